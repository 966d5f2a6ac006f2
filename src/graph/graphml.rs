//! GraphML persistence for link graphs
//!
//! The writer emits the layout common graph libraries produce: an XML
//! declaration, a `graphml` root in the GraphML namespace, one directed
//! `graph`, then every node followed by every edge. No `key`/`data`
//! attributes are written.
//!
//! The reader accepts GraphML produced by other tools as long as it is
//! directed; scalar `data` payloads are ignored.

use crate::graph::{GraphError, GraphResult, LinkGraph};
use std::fs;
use std::path::Path;
use xmlparser::{ElementEnd, Token, Tokenizer};

const GRAPHML_HEADER: &str = concat!(
    "<?xml version='1.0' encoding='utf-8'?>\n",
    "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" ",
    "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
    "xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns ",
    "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
);

/// Serializes a graph to a GraphML document
pub fn to_graphml(graph: &LinkGraph) -> String {
    let mut out = String::with_capacity(64 * (graph.node_count() + graph.edge_count()));
    out.push_str(GRAPHML_HEADER);
    out.push_str("  <graph edgedefault=\"directed\">\n");

    for title in graph.nodes() {
        out.push_str(&format!("    <node id=\"{}\" />\n", escape(title)));
    }
    for (source, target) in graph.edges() {
        out.push_str(&format!(
            "    <edge source=\"{}\" target=\"{}\" />\n",
            escape(source),
            escape(target)
        ));
    }

    out.push_str("  </graph>\n</graphml>\n");
    out
}

/// Writes a graph to `path`, creating parent directories as needed
pub fn write_graphml(graph: &LinkGraph, path: &Path) -> GraphResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_graphml(graph))?;
    tracing::debug!(
        "Wrote {} nodes, {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

/// Reads a graph from a GraphML file
pub fn read_graphml(path: &Path) -> GraphResult<LinkGraph> {
    let text = fs::read_to_string(path)?;
    parse_graphml(&text)
}

/// Element whose attributes are being collected
enum Pending {
    Graph { edge_default: Option<String> },
    Node { id: Option<String> },
    Edge {
        source: Option<String>,
        target: Option<String>,
        directed: Option<String>,
    },
}

/// Parses a GraphML document into a graph
pub fn parse_graphml(text: &str) -> GraphResult<LinkGraph> {
    let mut graph = LinkGraph::new();
    let mut pending: Option<Pending> = None;
    let mut saw_graph = false;

    for token in Tokenizer::from(text) {
        let token = token.map_err(|e| GraphError::Xml(e.to_string()))?;
        match token {
            Token::ElementStart { local, .. } => {
                pending = match local.as_str() {
                    "graph" => Some(Pending::Graph { edge_default: None }),
                    "node" => Some(Pending::Node { id: None }),
                    "edge" => Some(Pending::Edge {
                        source: None,
                        target: None,
                        directed: None,
                    }),
                    _ => None,
                };
            }
            Token::Attribute { local, value, .. } => {
                let value = unescape(value.as_str())?;
                match (pending.as_mut(), local.as_str()) {
                    (Some(Pending::Graph { edge_default }), "edgedefault") => {
                        *edge_default = Some(value)
                    }
                    (Some(Pending::Node { id }), "id") => *id = Some(value),
                    (Some(Pending::Edge { source, .. }), "source") => *source = Some(value),
                    (Some(Pending::Edge { target, .. }), "target") => *target = Some(value),
                    (Some(Pending::Edge { directed, .. }), "directed") => {
                        *directed = Some(value)
                    }
                    _ => {}
                }
            }
            Token::ElementEnd { end, .. } => {
                if matches!(end, ElementEnd::Close(..)) {
                    continue;
                }
                if let Some(element) = pending.take() {
                    saw_graph |= matches!(element, Pending::Graph { .. });
                    commit(&mut graph, element)?;
                }
            }
            _ => {}
        }
    }

    if !saw_graph {
        return Err(GraphError::Format(
            "document contains no <graph> element".to_string(),
        ));
    }

    Ok(graph)
}

fn commit(graph: &mut LinkGraph, element: Pending) -> GraphResult<()> {
    match element {
        Pending::Graph { edge_default } => {
            // GraphML makes edgedefault mandatory; tolerate its absence as directed
            if edge_default.as_deref() == Some("undirected") {
                return Err(GraphError::Format(
                    "undirected graphs are not supported".to_string(),
                ));
            }
        }
        Pending::Node { id } => {
            let id = id.ok_or_else(|| GraphError::Format("<node> without id".to_string()))?;
            graph.add_node(&id);
        }
        Pending::Edge {
            source,
            target,
            directed,
        } => {
            if directed.as_deref() == Some("false") {
                return Err(GraphError::Format(
                    "undirected edges are not supported".to_string(),
                ));
            }
            let (source, target) = source.zip(target).ok_or_else(|| {
                GraphError::Format("<edge> without source or target".to_string())
            })?;
            graph.add_edge(&source, &target);
        }
    }
    Ok(())
}

/// Escapes text for use inside a double-quoted XML attribute
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolves predefined and numeric character references
fn unescape(text: &str) -> GraphResult<String> {
    if !text.contains('&') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| GraphError::Format(format!("unterminated entity in '{}'", text)))?;
        let entity = &after[..end];
        let resolved = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32).ok_or_else(|| {
                    GraphError::Format(format!("unknown entity '&{};'", entity))
                })?
            }
        };
        out.push(resolved);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
