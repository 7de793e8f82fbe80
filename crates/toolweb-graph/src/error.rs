//! Error types for graph engine operations.
//!
//! Lookups of unknown tools, missing edges and unreachable targets are not
//! errors: they come back as `None` or empty collections. The variants here
//! cover caller misuse and serialization only.

use thiserror::Error;

/// The error type for graph engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A path enumeration limit of zero was requested.
    #[error("invalid path limit {0}: must be at least 1")]
    InvalidLimit(usize),

    /// A reliability threshold outside `[0, 1]` was requested.
    #[error("invalid reliability threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f64),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized Result type for graph engine operations.
pub type Result<T> = std::result::Result<T, Error>;
