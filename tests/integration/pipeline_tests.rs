//! Integration tests for the full pipeline

use crate::create_test_config;
use tempfile::tempdir;
use wikinet::analysis::{ANALYSIS_REPORT_FILE, METRICS_FILE};
use wikinet::cleaner::clean_graph_path;
use wikinet::crawler::{raw_graph_path, StaticProvider};
use wikinet::pipeline::run_pipeline_with_provider;
use wikinet::WikinetError;

fn topic_cluster() -> StaticProvider {
    StaticProvider::new()
        .with_page("Data engineering", ["Data warehouse", "ETL", "Data lakes"])
        .with_page("Data Warehouse", ["ETL", "Data engineering", "OLAP"])
        .with_page("Etl", ["Data warehouse", "Data engineering"])
        .with_page("Data Lakes", ["Data lake", "Data warehouse"])
}

#[tokio::test]
async fn test_pipeline_writes_every_artifact() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Data engineering", 2, dir.path());

    let outcome = run_pipeline_with_provider(topic_cluster(), &config)
        .await
        .unwrap();

    assert!(raw_graph_path(&config).exists());
    assert!(clean_graph_path(&config).exists());
    assert!(dir.path().join(ANALYSIS_REPORT_FILE).exists());
    assert!(dir.path().join(METRICS_FILE).exists());

    // "Data Lakes" is absorbed by its singular
    assert!(outcome.crawl.graph.contains_node("Data Lakes"));
    assert_eq!(outcome.clean.plural_merges.len(), 1);
    assert_eq!(outcome.analysis.node_count, outcome.clean.final_nodes);
    assert_eq!(outcome.analysis.top_degree[0].title, "Data Warehouse");
}

#[tokio::test]
async fn test_metrics_file_lists_every_node() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Data engineering", 2, dir.path());

    let outcome = run_pipeline_with_provider(topic_cluster(), &config)
        .await
        .unwrap();

    let text = std::fs::read_to_string(dir.path().join(METRICS_FILE)).unwrap();
    let metrics: serde_json::Value = serde_json::from_str(&text).unwrap();
    let nodes = metrics["nodes"].as_array().unwrap();

    assert_eq!(nodes.len(), outcome.analysis.node_count);
    assert!(nodes.iter().all(|n| n["core_number"].is_u64()));
}

#[tokio::test]
async fn test_pipeline_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Nowhere", 2, dir.path());

    let result = run_pipeline_with_provider(StaticProvider::new(), &config).await;

    assert!(matches!(result, Err(WikinetError::EmptyFrontier { .. })));
    assert!(!clean_graph_path(&config).exists());
    assert!(!dir.path().join(ANALYSIS_REPORT_FILE).exists());
}
