//! Integration tests for the cleaner
//!
//! Each test writes a raw graph into a temporary results directory, runs the
//! cleaning stage and inspects the persisted result.

use crate::create_test_config;
use tempfile::tempdir;
use wikinet::cleaner::{clean_graph_path, run_clean};
use wikinet::crawler::raw_graph_path;
use wikinet::graph::{read_graphml, to_graphml, write_graphml};
use wikinet::{LinkGraph, WikinetError};

fn raw_graph() -> LinkGraph {
    let mut graph = LinkGraph::new();
    for (source, target) in [
        ("Network", "Networks"),
        ("Networks", "Graph Theory"),
        ("Graph Theory", "Network"),
        ("Graph Theory", "Graph Theory"),
        ("Data-Set", "Graph Theory"),
        ("Data Set", "Network"),
        ("Network", "Data-Set"),
        ("Orphan", "Network"),
    ] {
        graph.add_edge(source, target);
    }
    graph
}

#[test]
fn test_clean_stage_end_to_end() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Network", 2, dir.path());
    write_graphml(&raw_graph(), &raw_graph_path(&config)).unwrap();

    let report = run_clean(&config).unwrap();
    let cleaned = read_graphml(&clean_graph_path(&config)).unwrap();

    assert_eq!(report.self_loops_removed, 1);
    assert_eq!(report.plural_merges.len(), 1);
    assert_eq!(report.spelling_merges.len(), 1);
    assert!(cleaned.self_loops().is_empty());
    assert!(!cleaned.contains_node("Networks"));
    assert!(!cleaned.contains_node("Data-Set"));
    assert!(!cleaned.contains_node("Orphan"));
    assert!(cleaned.contains_edge("Network", "Graph Theory"));
    assert!(cleaned.contains_edge("Data Set", "Graph Theory"));
    assert_eq!(report.final_nodes, cleaned.node_count());
    assert_eq!(report.final_edges, cleaned.edge_count());
}

#[test]
fn test_cleaned_graph_has_scalar_attributes_only() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Network", 2, dir.path());
    write_graphml(&raw_graph(), &raw_graph_path(&config)).unwrap();

    run_clean(&config).unwrap();
    let xml = std::fs::read_to_string(clean_graph_path(&config)).unwrap();

    assert!(!xml.contains("<data"));
    assert!(!xml.contains("contraction"));
    assert_eq!(xml, to_graphml(&read_graphml(&clean_graph_path(&config)).unwrap()));
}

#[test]
fn test_clean_without_raw_graph_fails() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Network", 2, dir.path());

    assert!(matches!(run_clean(&config), Err(WikinetError::Graph(_))));
    assert!(!clean_graph_path(&config).exists());
}

#[test]
fn test_min_degree_is_configurable() {
    let dir = tempdir().unwrap();
    let mut config = create_test_config("Network", 2, dir.path());
    config.cleaner.min_degree = 1;
    write_graphml(&raw_graph(), &raw_graph_path(&config)).unwrap();

    let report = run_clean(&config).unwrap();
    let cleaned = read_graphml(&clean_graph_path(&config)).unwrap();

    assert!(cleaned.contains_node("Orphan"));
    assert_eq!(report.final_nodes, report.merged_nodes);
}
