//! Wikinet main entry point
//!
//! This is the command-line interface for the Wikinet link-graph mapper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikinet::analysis::run_analysis;
use wikinet::cleaner::run_clean;
use wikinet::config::{load_config_with_hash, validate, Config};
use wikinet::crawler::{run_crawl, StopList};
use wikinet::output::{print_crawl_statistics, CrawlStatistics};
use wikinet::pipeline::run_pipeline;

/// Wikinet: an encyclopedia link-graph mapper
///
/// Wikinet crawls the link structure of Wikipedia from a seed article out to
/// a bounded depth, cleans the resulting graph and computes centrality and
/// core metrics over it.
#[derive(Parser, Debug)]
#[command(name = "wikinet")]
#[command(version)]
#[command(about = "An encyclopedia link-graph mapper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration and show what would be crawled
    Check,

    /// Crawl from the seed and write the raw graph
    Crawl(CrawlArgs),

    /// Clean the raw graph and write the cleaned graph
    Clean,

    /// Analyze the cleaned graph and write the reports
    Analyze,

    /// Crawl, clean and analyze in one go
    Run(CrawlArgs),
}

#[derive(clap::Args, Debug)]
struct CrawlArgs {
    /// Override the configured seed title
    #[arg(long)]
    seed: Option<String>,

    /// Override the configured maximum depth
    #[arg(long)]
    max_depth: Option<u32>,
}

impl CrawlArgs {
    /// Applies command-line overrides and revalidates
    fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(seed) = &self.seed {
            config.crawler.seed = seed.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        validate(config).context("Invalid command-line override")?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Check => handle_check(&config, &config_hash),
        Command::Crawl(args) => {
            args.apply(&mut config)?;
            handle_crawl(&config).await
        }
        Command::Clean => {
            run_clean(&config).context("Cleaning failed")?;
            Ok(())
        }
        Command::Analyze => {
            run_analysis(&config).context("Analysis failed")?;
            Ok(())
        }
        Command::Run(args) => {
            args.apply(&mut config)?;
            run_pipeline(&config).await.context("Pipeline failed")?;
            tracing::info!("Pipeline completed successfully");
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikinet=info,warn"),
            1 => EnvFilter::new("wikinet=debug,info"),
            2 => EnvFilter::new("wikinet=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the check command: shows the plan without touching the network
fn handle_check(config: &Config, config_hash: &str) -> anyhow::Result<()> {
    println!("=== Wikinet Check ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Listing prefix: {}", config.crawler.listing_prefix);
    println!(
        "  Stop titles: {}",
        StopList::from_config(&config.crawler).len()
    );

    println!("\nProvider:");
    println!("  API: {}", config.provider.api_url);
    println!("  Timeout: {}s", config.provider.request_timeout);
    println!("  User agent: {}", config.provider.user_agent());

    println!("\nCleaner:");
    println!("  Min degree: {}", config.cleaner.min_degree);

    println!("\nAnalyzer:");
    println!("  Top N: {}", config.analyzer.top_n);
    match config.analyzer.core_k {
        Some(k) => println!("  Core k: {}", k),
        None => println!("  Core k: innermost"),
    }
    match config.analyzer.shell_k {
        Some(k) => println!("  Shell k: {}", k),
        None => println!("  Shell k: one below innermost"),
    }

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);
    println!("  Config hash: {}", config_hash);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl from '{}' to depth {}",
        config.crawler.seed, config.crawler.max_depth
    );

    Ok(())
}

/// Handles the crawl command
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Seed: '{}', max depth: {}",
        config.crawler.seed,
        config.crawler.max_depth
    );

    match run_crawl(config).await {
        Ok(outcome) => {
            tracing::info!("Crawl completed successfully");
            print_crawl_statistics(&CrawlStatistics::from_outcome(&outcome));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
