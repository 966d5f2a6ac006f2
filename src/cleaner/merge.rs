//! Duplicate-node detection and contraction

use crate::graph::LinkGraph;
use std::fmt;

/// Two titles naming the same concept
///
/// `absorb` is contracted into `keep`: its edges move to `keep` and the node
/// itself disappears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMergePair {
    pub keep: String,
    pub absorb: String,
}

impl DuplicateMergePair {
    pub fn new(keep: impl Into<String>, absorb: impl Into<String>) -> Self {
        Self {
            keep: keep.into(),
            absorb: absorb.into(),
        }
    }
}

impl fmt::Display for DuplicateMergePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' <- '{}'", self.keep, self.absorb)
    }
}

/// Pairs `(n, n + "s")` for every node whose plural is also a node
pub fn plural_pairs(graph: &LinkGraph) -> Vec<DuplicateMergePair> {
    graph
        .nodes()
        .filter_map(|node| {
            let plural = format!("{}s", node);
            graph
                .contains_node(&plural)
                .then(|| DuplicateMergePair::new(node, plural))
        })
        .collect()
}

/// Pairs `(n.replace('-', ' '), n)` for every hyphenated node whose spaced
/// spelling is also a node
pub fn spelling_pairs(graph: &LinkGraph) -> Vec<DuplicateMergePair> {
    graph
        .nodes()
        .filter(|node| node.contains('-'))
        .filter_map(|node| {
            let spaced = node.replace('-', " ");
            graph
                .contains_node(&spaced)
                .then(|| DuplicateMergePair::new(spaced, node))
        })
        .collect()
}

/// Contracts each pair in order; returns the pairs actually applied
///
/// Pairs are computed up front, so an earlier contraction can remove a node a
/// later pair refers to. Such pairs are skipped.
pub fn apply_merges(
    graph: &mut LinkGraph,
    pairs: Vec<DuplicateMergePair>,
) -> Vec<DuplicateMergePair> {
    let mut applied = Vec::new();
    for pair in pairs {
        if graph.contract(&pair.keep, &pair.absorb) {
            tracing::debug!("Merged {}", pair);
            applied.push(pair);
        } else {
            tracing::debug!("Skipped stale merge {}", pair);
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_nodes(nodes: &[&str]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    #[test]
    fn test_plural_pairs() {
        let graph = graph_with_nodes(&["Network", "Networks", "Graph", "Data", "Datas"]);
        assert_eq!(
            plural_pairs(&graph),
            vec![
                DuplicateMergePair::new("Data", "Datas"),
                DuplicateMergePair::new("Network", "Networks"),
            ]
        );
    }

    #[test]
    fn test_spelling_pairs() {
        let graph = graph_with_nodes(&["data-set", "data set", "end-to-end", "Data"]);
        assert_eq!(
            spelling_pairs(&graph),
            vec![DuplicateMergePair::new("data set", "data-set")]
        );
    }

    #[test]
    fn test_chained_plurals_skip_stale_pairs() {
        let mut graph = LinkGraph::new();
        graph.add_edge("Bus", "Road");
        graph.add_edge("Buss", "Road");
        graph.add_edge("Busss", "Depot");

        let pairs = plural_pairs(&graph);
        assert_eq!(pairs.len(), 2);

        let applied = apply_merges(&mut graph, pairs);
        assert_eq!(applied, vec![DuplicateMergePair::new("Bus", "Buss")]);
        assert!(graph.contains_node("Busss"));
        assert!(!graph.contains_node("Buss"));
    }

    #[test]
    fn test_merge_unions_edges_without_self_loops() {
        let mut graph = LinkGraph::new();
        graph.add_edge("Network", "Graph");
        graph.add_edge("Networks", "Topology");
        graph.add_edge("Networks", "Network");
        graph.add_edge("Internet", "Networks");

        let pairs = plural_pairs(&graph);
        let applied = apply_merges(&mut graph, pairs);
        assert_eq!(applied.len(), 1);

        assert!(!graph.contains_node("Networks"));
        assert!(graph.contains_edge("Network", "Graph"));
        assert!(graph.contains_edge("Network", "Topology"));
        assert!(graph.contains_edge("Internet", "Network"));
        assert!(graph.self_loops().is_empty());
        assert_eq!(graph.edge_count(), 3);
    }
}
