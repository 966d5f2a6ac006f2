//! Cleaner module: turns the raw crawl graph into an analysis-ready graph
//!
//! Cleaning runs a fixed sequence of passes, each exactly once:
//! 1. self-loop removal
//! 2. plural merge (`"Network"` absorbs `"Networks"`)
//! 3. spelling merge (`"data set"` absorbs `"data-set"`)
//! 4. degree filter (induced subgraph on nodes with in+out degree of at
//!    least `min-degree`)

mod merge;

pub use merge::{apply_merges, plural_pairs, spelling_pairs, DuplicateMergePair};

use crate::config::Config;
use crate::graph::{read_graphml, write_graphml, LinkGraph, CLEAN_GRAPH_FILE, RAW_GRAPH_FILE};
use crate::output::print_clean_report;
use crate::WikinetError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What a cleaning run did to the graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    /// Size of the graph as loaded
    pub raw_nodes: usize,
    pub raw_edges: usize,

    /// Number of self-loops removed
    pub self_loops_removed: usize,

    /// Merges applied by the plural pass
    pub plural_merges: Vec<DuplicateMergePair>,

    /// Merges applied by the spelling pass
    pub spelling_merges: Vec<DuplicateMergePair>,

    /// Size after merging, before the degree filter
    pub merged_nodes: usize,
    pub merged_edges: usize,

    /// Size of the cleaned graph
    pub final_nodes: usize,
    pub final_edges: usize,
}

impl CleanReport {
    /// Percentage of post-merge nodes dropped by the degree filter
    pub fn nodes_removed_pct(&self) -> f64 {
        removed_pct(self.merged_nodes, self.final_nodes)
    }

    /// Percentage of post-merge edges dropped by the degree filter
    pub fn edges_removed_pct(&self) -> f64 {
        removed_pct(self.merged_edges, self.final_edges)
    }

    /// Edges per node of the cleaned graph
    pub fn edges_per_node(&self) -> f64 {
        if self.final_nodes == 0 {
            0.0
        } else {
            self.final_edges as f64 / self.final_nodes as f64
        }
    }
}

fn removed_pct(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        100.0 * (1.0 - after as f64 / before as f64)
    }
}

/// Keeps the nodes whose in+out degree is at least `min_degree`
///
/// Degrees are measured once on the input graph; the result is the induced
/// subgraph, so surviving nodes may end up with a lower degree.
pub fn degree_filter(graph: &LinkGraph, min_degree: usize) -> LinkGraph {
    let keep: BTreeSet<String> = graph
        .degrees()
        .into_iter()
        .filter(|(_, degree)| *degree >= min_degree)
        .map(|(title, _)| title.to_string())
        .collect();
    graph.induced_subgraph(&keep)
}

/// Runs every cleaning pass over `graph`
pub fn clean_graph(mut graph: LinkGraph, min_degree: usize) -> (LinkGraph, CleanReport) {
    let mut report = CleanReport {
        raw_nodes: graph.node_count(),
        raw_edges: graph.edge_count(),
        ..CleanReport::default()
    };

    report.self_loops_removed = graph.remove_self_loops();

    let pairs = plural_pairs(&graph);
    report.plural_merges = apply_merges(&mut graph, pairs);

    let pairs = spelling_pairs(&graph);
    report.spelling_merges = apply_merges(&mut graph, pairs);

    report.merged_nodes = graph.node_count();
    report.merged_edges = graph.edge_count();
    tracing::info!("{} nodes, {} edges", report.merged_nodes, report.merged_edges);

    let cleaned = degree_filter(&graph, min_degree);
    report.final_nodes = cleaned.node_count();
    report.final_edges = cleaned.edge_count();
    tracing::info!("{} nodes, {} edges", report.final_nodes, report.final_edges);

    (cleaned, report)
}

/// Path of the cleaned graph inside the results directory
pub fn clean_graph_path(config: &Config) -> PathBuf {
    Path::new(&config.output.results_dir).join(CLEAN_GRAPH_FILE)
}

/// Loads the raw graph, cleans it and persists the result
pub fn run_clean(config: &Config) -> Result<CleanReport, WikinetError> {
    let raw_path = Path::new(&config.output.results_dir).join(RAW_GRAPH_FILE);
    tracing::info!("Cleaning {}", raw_path.display());
    let raw = read_graphml(&raw_path)?;

    let (cleaned, report) = clean_graph(raw, config.cleaner.min_degree);

    let clean_path = clean_graph_path(config);
    write_graphml(&cleaned, &clean_path)?;
    tracing::info!("Cleaned graph written to {}", clean_path.display());

    print_clean_report(&report);
    Ok(report)
}
