//! Error types for toolweb CLI operations.

use std::io;
use thiserror::Error;

/// The error type for toolweb CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error while reading the registry or rendering output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.toolweb/` directory was found.
    #[error("Not a toolweb repository (or any parent). Run 'toolweb init' first.")]
    NotInitialized,

    /// A tool id given on the command line is not in the registry.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The graph engine rejected a query.
    #[error(transparent)]
    Graph(#[from] toolweb_graph::Error),
}

/// A specialized Result type for toolweb operations.
pub type Result<T> = std::result::Result<T, Error>;
