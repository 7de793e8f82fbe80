//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::{validate_limit, validate_threshold, validate_tool_id};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `deps` and `rdeps` commands
#[derive(Parser, Debug, Clone)]
pub struct DepsArgs {
    /// Tool ID to query
    #[arg(value_parser = validate_tool_id)]
    pub tool: String,

    /// Follow edges transitively instead of listing direct neighbours
    #[arg(short, long)]
    pub transitive: bool,

    /// Maximum hop count for a transitive query (implies --transitive)
    #[arg(long, value_parser = validate_limit)]
    pub depth: Option<usize>,
}

impl DepsArgs {
    /// Whether this query walks past direct neighbours.
    pub fn is_transitive(&self) -> bool {
        self.transitive || self.depth.is_some()
    }
}

/// Arguments for the `path` command
#[derive(Parser, Debug, Clone)]
pub struct PathArgs {
    /// Tool the path starts at (the dependent)
    #[arg(value_parser = validate_tool_id)]
    pub from: String,

    /// Tool the path ends at (the dependency)
    #[arg(value_parser = validate_tool_id)]
    pub to: String,
}

/// Arguments for the `allpaths` command
#[derive(Parser, Debug, Clone)]
pub struct AllPathsArgs {
    /// Tool the paths start at (the dependent)
    #[arg(value_parser = validate_tool_id)]
    pub from: String,

    /// Tool the paths end at (the dependency)
    #[arg(value_parser = validate_tool_id)]
    pub to: String,

    /// Maximum number of paths to list (defaults to `path-limit` in config)
    #[arg(short = 'n', long, value_parser = validate_limit)]
    pub limit: Option<usize>,
}

/// Arguments for commands that take a single tool
#[derive(Parser, Debug, Clone)]
pub struct ToolArgs {
    /// Tool ID to analyze
    #[arg(value_parser = validate_tool_id)]
    pub tool: String,
}

/// Arguments for the `chain-reliability` command
#[derive(Parser, Debug, Clone)]
pub struct ReliabilityArgs {
    /// Tool ID to analyze
    #[arg(value_parser = validate_tool_id)]
    pub tool: String,

    /// Compound reliability below which the chain is flagged
    /// (defaults to `reliability-threshold` in config)
    #[arg(long, value_parser = validate_threshold)]
    pub threshold: Option<f64>,
}
