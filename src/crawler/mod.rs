//! Crawler module for link-graph discovery
//!
//! This module contains the crawling logic, including:
//! - Link providers (MediaWiki API and in-memory)
//! - Title normalization and the stop list
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod filter;
mod frontier;
mod provider;

pub use coordinator::{crawl_with_provider, raw_graph_path, run_crawl, Coordinator, CrawlOutcome};
pub use filter::{title_case, StopList, DEFAULT_LISTING_PREFIX, DEFAULT_STOP_TITLES};
pub use frontier::{Frontier, FrontierEntry};
pub use provider::{
    build_http_client, FetchResult, LinkProvider, StaticProvider, WikipediaProvider,
};
