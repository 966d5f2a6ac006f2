//! Console statistics for each pipeline stage
//!
//! This module condenses stage results into summaries and prints them to
//! stdout.

use crate::analysis::AnalysisReport;
use crate::cleaner::CleanReport;
use crate::crawler::CrawlOutcome;
use crate::state::PageState;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of nodes in the raw graph
    pub nodes: usize,

    /// Number of edges in the raw graph
    pub edges: usize,

    /// Pages whose links were requested
    pub pages_expanded: usize,

    /// Expanded pages whose fetch failed
    pub pages_failed: usize,

    /// Titles ever enqueued
    pub titles_enqueued: usize,

    /// Titles left in the frontier at the depth bound
    pub titles_unexpanded: usize,

    /// Expanded pages per discovery depth
    pub depth_breakdown: BTreeMap<u32, usize>,
}

impl CrawlStatistics {
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let mut depth_breakdown = BTreeMap::new();
        for entry in &outcome.expanded {
            *depth_breakdown.entry(entry.depth).or_insert(0) += 1;
        }

        Self {
            nodes: outcome.graph.node_count(),
            edges: outcome.graph.edge_count(),
            pages_expanded: outcome.expanded.len(),
            pages_failed: outcome.visited.count(PageState::Failed),
            titles_enqueued: outcome.enqueued,
            titles_unexpanded: outcome.remaining.len(),
            depth_breakdown,
        }
    }

    /// Share of expanded pages that loaded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_expanded == 0 {
            0.0
        } else {
            (self.pages_expanded - self.pages_failed) as f64 / self.pages_expanded as f64 * 100.0
        }
    }
}

/// Prints crawl statistics to stdout in a formatted manner
pub fn print_crawl_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Graph:");
    println!("  {} nodes, {} edges", stats.nodes, stats.edges);
    println!();

    println!("Pages:");
    println!("  Expanded: {}", stats.pages_expanded);
    println!("  Failed: {}", stats.pages_failed);
    println!("  Enqueued: {}", stats.titles_enqueued);
    println!("  Left unexpanded: {}", stats.titles_unexpanded);
    println!();

    if !stats.depth_breakdown.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &stats.depth_breakdown {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    println!("Success Rate: {:.1}%", stats.success_rate());
}

/// Prints the cleaning reduction summary to stdout
pub fn print_clean_report(report: &CleanReport) {
    println!("=== Cleaning Summary ===\n");

    println!("Raw graph: {} nodes, {} edges", report.raw_nodes, report.raw_edges);
    println!("Self-loops removed: {}", report.self_loops_removed);
    println!(
        "Merged duplicates: {} plural, {} spelling",
        report.plural_merges.len(),
        report.spelling_merges.len()
    );
    println!(
        "After merging: {} nodes, {} edges",
        report.merged_nodes, report.merged_edges
    );
    println!(
        "After degree filter: {} nodes, {} edges",
        report.final_nodes, report.final_edges
    );
    println!();

    println!("Nodes removed: {:.2}%", report.nodes_removed_pct());
    println!("Edges removed: {:.2}%", report.edges_removed_pct());
    println!("Final edges per node ratio: {:.2}", report.edges_per_node());
}

/// Prints a short analysis summary to stdout
pub fn print_analysis_summary(report: &AnalysisReport) {
    println!("=== Analysis Summary ===\n");

    println!("Graph: {} nodes, {} edges", report.node_count, report.edge_count);

    let leader = |ranking: &[crate::analysis::RankedNode]| {
        ranking
            .first()
            .map(|node| format!("{} ({:.3})", node.title, node.value))
            .unwrap_or_else(|| "-".to_string())
    };
    println!("Top by degree: {}", leader(&report.top_degree));
    println!("Top by closeness: {}", leader(&report.top_closeness));
    println!("Top by betweenness: {}", leader(&report.top_betweenness));
    match &report.top_eigenvector {
        Some(ranking) => println!("Top by eigenvector: {}", leader(ranking)),
        None => println!("Top by eigenvector: not converged"),
    }

    let levels: Vec<String> = report.core_levels.iter().map(|k| k.to_string()).collect();
    println!("Core levels: {}", levels.join(", "));
    println!(
        "{}-core: {} nodes, {}-shell: {} nodes",
        report.core_k,
        report.core_nodes.len(),
        report.shell_k,
        report.shell_nodes.len()
    );
}
