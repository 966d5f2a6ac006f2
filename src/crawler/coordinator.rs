//! Crawler coordinator - bounded breadth-first crawl
//!
//! The coordinator owns every piece of crawl state (frontier, visited set and
//! the graph under construction) for the lifetime of one crawl. Pages are
//! fetched one at a time; the provider call is the only await point.

use crate::config::Config;
use crate::crawler::filter::{title_case, StopList};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::provider::{FetchResult, LinkProvider, WikipediaProvider};
use crate::graph::{write_graphml, LinkGraph, RAW_GRAPH_FILE};
use crate::state::{PageState, VisitedSet};
use crate::WikinetError;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything a finished crawl leaves behind
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The raw link graph
    pub graph: LinkGraph,

    /// Final state of every title ever enqueued
    pub visited: VisitedSet,

    /// Pages expanded, in the order they were fetched
    pub expanded: Vec<FrontierEntry>,

    /// Entries left in the frontier when the depth bound was reached
    pub remaining: Vec<FrontierEntry>,

    /// Total number of titles ever enqueued
    pub enqueued: usize,
}

impl CrawlOutcome {
    /// Number of pages whose fetch failed
    pub fn failed(&self) -> usize {
        self.visited.count(PageState::Failed)
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<P: LinkProvider> {
    provider: P,
    stop_list: StopList,
    max_depth: u32,
    frontier: Frontier,
    visited: VisitedSet,
    graph: LinkGraph,
    expanded: Vec<FrontierEntry>,
}

impl<P: LinkProvider> Coordinator<P> {
    /// Creates a coordinator with an empty frontier
    pub fn new(provider: P, stop_list: StopList, max_depth: u32) -> Self {
        Self {
            provider,
            stop_list,
            max_depth,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            graph: LinkGraph::new(),
            expanded: Vec::new(),
        }
    }

    /// Crawls from `seed` until the frontier head reaches the depth bound
    ///
    /// Fetch failures are logged and skipped. The crawl only fails when it
    /// ends without having recorded a single edge.
    pub async fn crawl(mut self, seed: &str) -> Result<CrawlOutcome, WikinetError> {
        tracing::info!("Starting crawl from '{}' (max depth {})", seed, self.max_depth);
        let start_time = Instant::now();

        self.visited.mark_seen(seed);
        self.frontier.push(FrontierEntry::new(0, seed));

        while let Some(entry) = self.frontier.pop_expandable(self.max_depth) {
            self.expand(&entry).await?;
            self.expanded.push(entry);
        }

        if let Some(head) = self.frontier.head() {
            tracing::debug!(
                "Depth bound reached at '{}'; {} entries left unexpanded",
                head.title,
                self.frontier.len()
            );
        }

        tracing::info!(
            "Crawl finished in {:?}: {} pages expanded, {} failed",
            start_time.elapsed(),
            self.expanded.len(),
            self.visited.count(PageState::Failed)
        );
        tracing::info!(
            "Nodes: {}, edges: {}",
            self.graph.node_count(),
            self.graph.edge_count()
        );

        if self.graph.edge_count() == 0 {
            return Err(WikinetError::EmptyFrontier {
                seed: seed.to_string(),
            });
        }

        Ok(CrawlOutcome {
            graph: self.graph,
            visited: self.visited,
            expanded: self.expanded,
            enqueued: self.frontier.total_enqueued(),
            remaining: self.frontier.into_remaining(),
        })
    }

    /// Fetches one page and records its links
    async fn expand(&mut self, entry: &FrontierEntry) -> Result<(), WikinetError> {
        self.visited.transition(&entry.title, PageState::Fetching)?;
        tracing::info!("{}", entry);

        match self.provider.fetch_links(&entry.title).await {
            FetchResult::Success { links } => {
                self.record_links(entry, links);
                self.visited.transition(&entry.title, PageState::Done)?;
            }
            failure => {
                let reason = failure.failure_reason().unwrap_or_default();
                tracing::warn!("Could not load '{}': {}", entry.title, reason);
                self.visited.transition(&entry.title, PageState::Failed)?;
            }
        }

        Ok(())
    }

    fn record_links(&mut self, entry: &FrontierEntry, links: Vec<String>) {
        for raw in links {
            let link = title_case(&raw);
            if self.stop_list.is_excluded(&link) {
                tracing::trace!("Skipping stop-listed link '{}'", link);
                continue;
            }

            self.graph.add_edge(&entry.title, &link);

            if self.visited.mark_seen(&link) {
                tracing::debug!("Enqueued '{}' at depth {}", link, entry.depth + 1);
                self.frontier.push(FrontierEntry::new(entry.depth + 1, link));
            }
        }
    }
}

/// Path of the raw graph inside the results directory
pub fn raw_graph_path(config: &Config) -> PathBuf {
    Path::new(&config.output.results_dir).join(RAW_GRAPH_FILE)
}

/// Crawls with the given provider and persists the raw graph
///
/// Nothing is written when the crawl fails.
pub async fn crawl_with_provider<P: LinkProvider>(
    provider: P,
    config: &Config,
) -> Result<CrawlOutcome, WikinetError> {
    let stop_list = StopList::from_config(&config.crawler);
    let coordinator = Coordinator::new(provider, stop_list, config.crawler.max_depth);
    let outcome = coordinator.crawl(&config.crawler.seed).await?;

    let path = raw_graph_path(config);
    write_graphml(&outcome.graph, &path)?;
    tracing::info!("Raw graph written to {}", path.display());

    Ok(outcome)
}

/// Runs a complete crawl against the configured MediaWiki API
///
/// # Example
///
/// ```no_run
/// use wikinet::config::load_config;
/// use wikinet::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let outcome = run_crawl(&config).await?;
/// println!("{} edges", outcome.graph.edge_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, WikinetError> {
    let provider = WikipediaProvider::new(&config.provider)?;
    crawl_with_provider(provider, config).await
}
