//! Graph module: the owned link graph and its GraphML persistence
//!
//! `LinkGraph` is the single graph type shared by every pipeline stage. The
//! crawler builds one, the cleaner rewrites it and the analyzer reads it.

mod graphml;
mod link_graph;

pub use graphml::{parse_graphml, read_graphml, to_graphml, write_graphml};
pub use link_graph::LinkGraph;

use thiserror::Error;

/// File name of the crawler's output inside the results directory
pub const RAW_GRAPH_FILE: &str = "wikipedia_network_raw.graphml";

/// File name of the cleaner's output inside the results directory
pub const CLEAN_GRAPH_FILE: &str = "wikipedia_network.graphml";

/// Errors that can occur while persisting or loading graphs
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Unsupported GraphML: {0}")]
    Format(String),
}

/// Result type for graph persistence operations
pub type GraphResult<T> = Result<T, GraphError>;
