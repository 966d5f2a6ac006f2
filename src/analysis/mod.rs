//! Analysis module: structural metrics over the cleaned graph
//!
//! This module computes:
//! - degree, closeness, betweenness and eigenvector centrality
//! - core numbers with the k-core and k-shell they induce
//! - the low-degree distribution (PDF and CDF)
//!
//! Results are written as a markdown report and a JSON metrics file.

mod centrality;
mod cores;
mod distribution;

pub use centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality,
    EIGENVECTOR_MAX_ITER, EIGENVECTOR_TOLERANCE,
};
pub use cores::{core_numbers, k_core, k_shell};
pub use distribution::{degree_distribution, DegreeBin, MAX_REPORTED_DEGREE};

use crate::config::{AnalyzerConfig, Config};
use crate::graph::{read_graphml, LinkGraph, CLEAN_GRAPH_FILE};
use crate::output::{print_analysis_summary, write_analysis_markdown};
use crate::WikinetError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the markdown report inside the results directory
pub const ANALYSIS_REPORT_FILE: &str = "analysis.md";

/// File name of the per-node metrics inside the results directory
pub const METRICS_FILE: &str = "metrics.json";

/// Errors that can occur while computing metrics
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Eigenvector centrality did not converge in {iterations} iterations")]
    NoConvergence { iterations: usize },

    #[error("Core decomposition requires a graph without self-loops; '{0}' links to itself")]
    SelfLoop(String),
}

/// Index-based view of a [`LinkGraph`]
///
/// Nodes are numbered in title order.
#[derive(Debug)]
pub struct Adjacency<'a> {
    pub titles: Vec<&'a str>,
    pub successors: Vec<Vec<usize>>,
    pub predecessors: Vec<Vec<usize>>,
}

impl<'a> Adjacency<'a> {
    pub fn new(graph: &'a LinkGraph) -> Self {
        let titles: Vec<&str> = graph.nodes().collect();
        let index: HashMap<&str, usize> = titles.iter().enumerate().map(|(i, t)| (*t, i)).collect();

        let mut successors = vec![Vec::new(); titles.len()];
        let mut predecessors = vec![Vec::new(); titles.len()];
        for (source, target) in graph.edges() {
            let (s, t) = (index[source], index[target]);
            successors[s].push(t);
            predecessors[t].push(s);
        }

        Self {
            titles,
            successors,
            predecessors,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// In+out degree of node `v`
    pub fn degree(&self, v: usize) -> usize {
        self.successors[v].len() + self.predecessors[v].len()
    }
}

/// A node and its score in one ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub title: String,
    pub value: f64,
}

/// Every metric computed for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub title: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree_centrality: f64,
    pub closeness_centrality: f64,
    pub betweenness_centrality: f64,
    pub eigenvector_centrality: Option<f64>,
    pub core_number: usize,
}

/// Result of analyzing one graph
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: usize,
    pub degree_distribution: Vec<DegreeBin>,
    pub top_degree: Vec<RankedNode>,
    pub top_closeness: Vec<RankedNode>,
    pub top_betweenness: Vec<RankedNode>,

    /// `None` when the power iteration did not converge
    pub top_eigenvector: Option<Vec<RankedNode>>,

    /// Distinct core numbers present in the graph
    pub core_levels: BTreeSet<usize>,
    pub core_k: usize,
    pub core_nodes: Vec<String>,
    pub shell_k: usize,
    pub shell_nodes: Vec<String>,
    pub nodes: Vec<NodeMetrics>,
}

/// Computes every metric over `graph`
pub fn analyze(graph: &LinkGraph, config: &AnalyzerConfig) -> Result<AnalysisReport, AnalysisError> {
    let adj = Adjacency::new(graph);
    if adj.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }

    let degree = degree_centrality(&adj);
    let closeness = closeness_centrality(&adj);
    let betweenness = betweenness_centrality(&adj);
    let eigenvector =
        match eigenvector_centrality(&adj, EIGENVECTOR_MAX_ITER, EIGENVECTOR_TOLERANCE) {
            Ok(scores) => Some(scores),
            Err(e) => {
                tracing::warn!("{}; omitting eigenvector centrality", e);
                None
            }
        };

    let core = core_numbers(&adj)?;
    let max_core = core.iter().copied().max().unwrap_or(0);
    let core_k = config.core_k.unwrap_or(max_core);
    let shell_k = config.shell_k.unwrap_or(max_core.saturating_sub(1));
    let titles_of = |indices: Vec<usize>| -> Vec<String> {
        indices.into_iter().map(|v| adj.titles[v].to_string()).collect()
    };
    tracing::debug!("Core levels present: {:?}", core.iter().collect::<BTreeSet<_>>());

    let nodes = (0..adj.len())
        .map(|v| NodeMetrics {
            title: adj.titles[v].to_string(),
            in_degree: adj.predecessors[v].len(),
            out_degree: adj.successors[v].len(),
            degree_centrality: degree[v],
            closeness_centrality: closeness[v],
            betweenness_centrality: betweenness[v],
            eigenvector_centrality: eigenvector.as_ref().map(|scores| scores[v]),
            core_number: core[v],
        })
        .collect();

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        degree_distribution: degree_distribution(&adj),
        top_degree: top_ranked(&adj, &degree, config.top_n),
        top_closeness: top_ranked(&adj, &closeness, config.top_n),
        top_betweenness: top_ranked(&adj, &betweenness, config.top_n),
        top_eigenvector: eigenvector
            .as_ref()
            .map(|scores| top_ranked(&adj, scores, config.top_n)),
        core_levels: core.iter().copied().collect(),
        core_k,
        core_nodes: titles_of(k_core(&core, core_k)),
        shell_k,
        shell_nodes: titles_of(k_shell(&core, shell_k)),
        nodes,
    })
}

/// The `n` highest scores, rounded to three decimals
///
/// Ties keep title order.
fn top_ranked(adj: &Adjacency<'_>, scores: &[f64], n: usize) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = adj
        .titles
        .iter()
        .zip(scores)
        .map(|(title, value)| RankedNode {
            title: title.to_string(),
            value: round3(*value),
        })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(n);
    ranked
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Loads the cleaned graph, analyzes it and writes both reports
pub fn run_analysis(config: &Config) -> Result<AnalysisReport, WikinetError> {
    let results_dir = Path::new(&config.output.results_dir);
    let graph_path = results_dir.join(CLEAN_GRAPH_FILE);
    tracing::info!("Analyzing {}", graph_path.display());

    let graph = read_graphml(&graph_path)?;
    let report = analyze(&graph, &config.analyzer)?;

    let report_path = results_dir.join(ANALYSIS_REPORT_FILE);
    write_analysis_markdown(&report, &report_path)?;
    tracing::info!("Report written to {}", report_path.display());

    let metrics_path = results_dir.join(METRICS_FILE);
    fs::write(&metrics_path, serde_json::to_string_pretty(&report)?)?;
    tracing::info!("Metrics written to {}", metrics_path.display());

    print_analysis_summary(&report);
    Ok(report)
}
