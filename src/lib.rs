//! Wikinet: an encyclopedia link-graph mapper
//!
//! This crate crawls the hyperlink structure of an online encyclopedia from a
//! seed topic out to a bounded depth, cleans the resulting directed graph and
//! computes structural metrics over it.

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod state;

use thiserror::Error;

/// Main error type for Wikinet operations
#[derive(Debug, Error)]
pub enum WikinetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(#[from] graph::GraphError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] analysis::AnalysisError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Crawl from '{seed}' recorded no links: frontier exhausted before any page was expanded")]
    EmptyFrontier { seed: String },

    #[error("Invalid state transition for '{title}': {from:?} -> {to:?}")]
    InvalidTransition {
        title: String,
        from: state::PageState,
        to: state::PageState,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wikinet operations
pub type Result<T> = std::result::Result<T, WikinetError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use graph::LinkGraph;
pub use state::PageState;
