//! Markdown report generation
//!
//! This module renders an analysis report as human-readable markdown:
//! graph size, degree distribution, centrality rankings and the core/shell
//! membership.

use crate::analysis::{AnalysisReport, RankedNode};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Members listed before a node set is abbreviated
const MAX_LISTED_MEMBERS: usize = 50;

/// Writes the markdown rendering of `report` to `output_path`
///
/// # Arguments
///
/// * `report` - The analysis results
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(io::Error)` - Failed to create or write the file
pub fn write_analysis_markdown(report: &AnalysisReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_analysis_markdown(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an analysis report as markdown
pub fn format_analysis_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();

    md.push_str("# Wikinet Graph Analysis\n\n");

    md.push_str("## Graph\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Nodes**: {}\n", report.node_count));
    md.push_str(&format!("- **Edges**: {}\n", report.edge_count));
    let ratio = if report.node_count > 0 {
        report.edge_count as f64 / report.node_count as f64
    } else {
        0.0
    };
    md.push_str(&format!("- **Edges per node**: {:.2}\n\n", ratio));

    // Degree distribution
    md.push_str("## Degree Distribution\n\n");
    md.push_str("| Degree | Nodes | PDF | CDF |\n");
    md.push_str("|--------|-------|-----|-----|\n");
    for bin in &report.degree_distribution {
        md.push_str(&format!(
            "| {} | {} | {:.3} | {:.3} |\n",
            bin.degree, bin.count, bin.pdf, bin.cdf
        ));
    }
    md.push('\n');

    push_ranking(&mut md, "Degree Centrality", &report.top_degree);
    push_ranking(&mut md, "Closeness Centrality", &report.top_closeness);
    push_ranking(&mut md, "Betweenness Centrality", &report.top_betweenness);
    match &report.top_eigenvector {
        Some(ranking) => push_ranking(&mut md, "Eigenvector Centrality", ranking),
        None => md.push_str(
            "## Top Nodes by Eigenvector Centrality\n\n\
             Power iteration did not converge; no ranking available.\n\n",
        ),
    }

    // Cores
    md.push_str("## Core Decomposition\n\n");
    let levels: Vec<String> = report.core_levels.iter().map(|k| k.to_string()).collect();
    md.push_str(&format!("- **Core levels**: {}\n\n", levels.join(", ")));
    push_members(
        &mut md,
        &format!("{}-Core", report.core_k),
        &report.core_nodes,
    );
    push_members(
        &mut md,
        &format!("{}-Shell", report.shell_k),
        &report.shell_nodes,
    );

    md
}

fn push_ranking(md: &mut String, measure: &str, ranking: &[RankedNode]) {
    md.push_str(&format!("## Top Nodes by {}\n\n", measure));
    md.push_str("| Rank | Title | Value |\n");
    md.push_str("|------|-------|-------|\n");
    for (rank, node) in ranking.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {:.3} |\n",
            rank + 1,
            node.title.replace('|', "\\|"),
            node.value
        ));
    }
    md.push('\n');
}

fn push_members(md: &mut String, heading: &str, members: &[String]) {
    md.push_str(&format!("### {} ({} nodes)\n\n", heading, members.len()));
    for title in members.iter().take(MAX_LISTED_MEMBERS) {
        md.push_str(&format!("- {}\n", title));
    }
    if members.len() > MAX_LISTED_MEMBERS {
        md.push_str(&format!(
            "\n... and {} more\n",
            members.len() - MAX_LISTED_MEMBERS
        ));
    }
    md.push('\n');
}
