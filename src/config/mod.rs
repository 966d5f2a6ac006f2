//! Configuration module for Wikinet
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wikinet::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wikinet.toml")).unwrap();
//! println!("Crawl starts from: {}", config.crawler.seed);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalyzerConfig, CleanerConfig, Config, CrawlerConfig, OutputConfig, ProviderConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
