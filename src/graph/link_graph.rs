use std::collections::{BTreeMap, BTreeSet};

/// Directed page-link graph keyed by title
///
/// Nodes are titles; an edge `(source, target)` means "source links to
/// target". Edges form a set, so recording the same link twice is a no-op.
/// A reverse index keeps predecessor lookups as cheap as successor lookups.
/// The graph carries no attributes at all, so anything persisted from it is
/// scalar by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    nodes: BTreeSet<String>,
    /// (source, target)
    out_edges: BTreeSet<(String, String)>,
    /// (target, source)
    in_edges: BTreeSet<(String, String)>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; returns `true` if it was not present
    pub fn add_node(&mut self, title: &str) -> bool {
        if self.nodes.contains(title) {
            return false;
        }
        self.nodes.insert(title.to_string())
    }

    /// Adds a directed edge, creating missing endpoints
    ///
    /// Returns `true` if the edge was not present.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        self.add_node(source);
        self.add_node(target);
        let inserted = self
            .out_edges
            .insert((source.to_string(), target.to_string()));
        if inserted {
            self.in_edges
                .insert((target.to_string(), source.to_string()));
        }
        inserted
    }

    /// Removes a directed edge; endpoints stay in the graph
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let removed = self
            .out_edges
            .remove(&(source.to_string(), target.to_string()));
        if removed {
            self.in_edges
                .remove(&(target.to_string(), source.to_string()));
        }
        removed
    }

    /// Removes a node and every edge touching it
    pub fn remove_node(&mut self, title: &str) -> bool {
        if !self.nodes.remove(title) {
            return false;
        }
        for target in self.successors_owned(title) {
            self.remove_edge(title, &target);
        }
        for source in self.predecessors_owned(title) {
            self.remove_edge(&source, title);
        }
        true
    }

    pub fn contains_node(&self, title: &str) -> bool {
        self.nodes.contains(title)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.out_edges
            .contains(&(source.to_string(), target.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.out_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over node titles in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Iterates over edges ordered by (source, target)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.out_edges
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Titles `title` links to
    pub fn successors<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        adjacent(&self.out_edges, title)
    }

    /// Titles linking to `title`
    pub fn predecessors<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        adjacent(&self.in_edges, title)
    }

    pub fn out_degree(&self, title: &str) -> usize {
        self.successors(title).count()
    }

    pub fn in_degree(&self, title: &str) -> usize {
        self.predecessors(title).count()
    }

    /// In-degree plus out-degree; a self-loop counts twice
    pub fn degree(&self, title: &str) -> usize {
        self.in_degree(title) + self.out_degree(title)
    }

    /// Degree of every node
    pub fn degrees(&self) -> BTreeMap<&str, usize> {
        let mut degrees: BTreeMap<&str, usize> = self.nodes().map(|n| (n, 0)).collect();
        for (source, target) in self.edges() {
            if let Some(d) = degrees.get_mut(source) {
                *d += 1;
            }
            if let Some(d) = degrees.get_mut(target) {
                *d += 1;
            }
        }
        degrees
    }

    /// Nodes carrying an edge to themselves
    pub fn self_loops(&self) -> Vec<String> {
        self.out_edges
            .iter()
            .filter(|(s, t)| s == t)
            .map(|(s, _)| s.clone())
            .collect()
    }

    /// Removes every self-loop; returns how many were removed
    pub fn remove_self_loops(&mut self) -> usize {
        let loops = self.self_loops();
        for title in &loops {
            self.remove_edge(title, title);
        }
        loops.len()
    }

    /// Contracts `absorb` into `keep`
    ///
    /// Every edge of `absorb` is redirected onto `keep`, `absorb` is deleted,
    /// and edges that would become self-loops are dropped. Returns `false`
    /// (and leaves the graph untouched) when either node is missing or both
    /// are the same node.
    pub fn contract(&mut self, keep: &str, absorb: &str) -> bool {
        if keep == absorb || !self.contains_node(keep) || !self.contains_node(absorb) {
            return false;
        }

        let targets = self.successors_owned(absorb);
        let sources = self.predecessors_owned(absorb);
        self.remove_node(absorb);

        for target in targets {
            if target != keep && target != absorb {
                self.add_edge(keep, &target);
            }
        }
        for source in sources {
            if source != keep && source != absorb {
                self.add_edge(&source, keep);
            }
        }
        true
    }

    /// Subgraph on `keep` containing exactly the edges with both endpoints in it
    pub fn induced_subgraph(&self, keep: &BTreeSet<String>) -> LinkGraph {
        let mut sub = LinkGraph::new();
        for title in self.nodes() {
            if keep.contains(title) {
                sub.add_node(title);
            }
        }
        for (source, target) in self.edges() {
            if keep.contains(source) && keep.contains(target) {
                sub.add_edge(source, target);
            }
        }
        sub
    }

    fn successors_owned(&self, title: &str) -> Vec<String> {
        self.successors(title).map(str::to_string).collect()
    }

    fn predecessors_owned(&self, title: &str) -> Vec<String> {
        self.predecessors(title).map(str::to_string).collect()
    }
}

/// Second elements of all pairs whose first element is `key`
fn adjacent<'a>(
    pairs: &'a BTreeSet<(String, String)>,
    key: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    pairs
        .range((key.to_string(), String::new())..)
        .take_while(move |(first, _)| first == key)
        .map(|(_, second)| second.as_str())
}
