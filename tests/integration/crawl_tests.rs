//! Integration tests for the crawler
//!
//! These tests run whole crawls against an in-memory provider and against a
//! wiremock server speaking the MediaWiki API, then check what was persisted.

use crate::{create_test_config, create_test_config_with_api};
use tempfile::tempdir;
use wikinet::crawler::{crawl_with_provider, raw_graph_path, run_crawl, StaticProvider};
use wikinet::graph::read_graphml;
use wikinet::state::PageState;
use wikinet::WikinetError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn links_body(title: &str, links: &[&str]) -> serde_json::Value {
    let links: Vec<serde_json::Value> = links
        .iter()
        .map(|l| serde_json::json!({"ns": 0, "title": l}))
        .collect();
    serde_json::json!({
        "batchcomplete": true,
        "query": {"pages": [{"pageid": 1, "ns": 0, "title": title, "links": links}]}
    })
}

#[tokio::test]
async fn test_crawl_persists_raw_graph() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Data engineering", 2, dir.path());
    let provider = StaticProvider::new()
        .with_page("Data engineering", ["A", "B"])
        .with_page("A", ["C"])
        .with_page("B", Vec::<String>::new());

    let outcome = crawl_with_provider(provider, &config).await.unwrap();

    let path = raw_graph_path(&config);
    assert!(path.exists());
    let persisted = read_graphml(&path).unwrap();
    assert_eq!(persisted, outcome.graph);
    assert_eq!(persisted.edge_count(), 3);
    assert!(persisted.contains_edge("A", "C"));
    assert_eq!(outcome.visited.state("C"), Some(PageState::Pending));
}

#[tokio::test]
async fn test_failed_crawl_persists_nothing() {
    let dir = tempdir().unwrap();
    let config = create_test_config("Nowhere", 2, dir.path());

    let result = crawl_with_provider(StaticProvider::new(), &config).await;

    assert!(matches!(result, Err(WikinetError::EmptyFrontier { .. })));
    assert!(!raw_graph_path(&config).exists());
}

#[tokio::test]
async fn test_extra_stop_titles_apply() {
    let dir = tempdir().unwrap();
    let mut config = create_test_config("Seed", 1, dir.path());
    config.crawler.extra_stop_titles = vec!["wikidata".to_string()];
    let provider = StaticProvider::new().with_page("Seed", ["Wikidata", "Schema"]);

    let outcome = crawl_with_provider(provider, &config).await.unwrap();

    assert!(!outcome.graph.contains_node("Wikidata"));
    assert!(outcome.graph.contains_edge("Seed", "Schema"));
}

#[tokio::test]
async fn test_crawl_through_mediawiki_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Data engineering"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body(
            "Data engineering",
            &["Data warehouse", "ISBN (identifier)", "List of databases"],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Data Warehouse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(links_body("Data warehouse", &["Data engineering", "OLAP"])),
        )
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let api_url = format!("{}/w/api.php", mock_server.uri());
    let config = create_test_config_with_api("Data engineering", 2, dir.path(), &api_url);

    let outcome = run_crawl(&config).await.unwrap();

    assert_eq!(outcome.graph.edge_count(), 3);
    assert!(outcome.graph.contains_edge("Data engineering", "Data Warehouse"));
    assert!(outcome.graph.contains_edge("Data Warehouse", "Data Engineering"));
    assert!(outcome.graph.contains_edge("Data Warehouse", "Olap"));
    assert!(!outcome.graph.contains_node("Isbn (Identifier)"));
    assert_eq!(outcome.failed(), 0);
    assert!(raw_graph_path(&config).exists());
}

#[tokio::test]
async fn test_http_failures_are_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Seed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body("Seed", &["Broken", "Fine"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Fine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body("Fine", &["Seed"])))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let api_url = format!("{}/w/api.php", mock_server.uri());
    let config = create_test_config_with_api("Seed", 2, dir.path(), &api_url);

    let outcome = run_crawl(&config).await.unwrap();

    assert_eq!(outcome.visited.state("Broken"), Some(PageState::Failed));
    assert_eq!(outcome.visited.state("Fine"), Some(PageState::Done));
    assert!(outcome.graph.contains_edge("Fine", "Seed"));
    assert_eq!(outcome.expanded.len(), 3);
}
