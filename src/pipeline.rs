//! Full pipeline: crawl, clean, analyze
//!
//! Stages run in fixed order and the first failing stage stops the run.

use crate::analysis::{run_analysis, AnalysisReport};
use crate::cleaner::{run_clean, CleanReport};
use crate::config::Config;
use crate::crawler::{crawl_with_provider, CrawlOutcome, LinkProvider, WikipediaProvider};
use crate::output::{print_crawl_statistics, CrawlStatistics};
use crate::WikinetError;

/// Results of every stage of one pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    pub crawl: CrawlOutcome,
    pub clean: CleanReport,
    pub analysis: AnalysisReport,
}

/// Runs the pipeline with the given link provider
pub async fn run_pipeline_with_provider<P: LinkProvider>(
    provider: P,
    config: &Config,
) -> Result<PipelineOutcome, WikinetError> {
    tracing::info!("Stage 1/3: crawl");
    let crawl = crawl_with_provider(provider, config).await?;
    print_crawl_statistics(&CrawlStatistics::from_outcome(&crawl));

    tracing::info!("Stage 2/3: clean");
    let clean = run_clean(config)?;

    tracing::info!("Stage 3/3: analyze");
    let analysis = run_analysis(config)?;

    Ok(PipelineOutcome {
        crawl,
        clean,
        analysis,
    })
}

/// Runs the pipeline against the configured MediaWiki API
pub async fn run_pipeline(config: &Config) -> Result<PipelineOutcome, WikinetError> {
    let provider = WikipediaProvider::new(&config.provider)?;
    run_pipeline_with_provider(provider, config).await
}
