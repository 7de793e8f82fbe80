//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for toolweb using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new toolweb repository
//! - `deps` / `rdeps`: List dependencies or dependents of a tool
//! - `path` / `allpaths`: Find dependency paths between two tools
//! - `affected`: List every tool affected by a change
//! - `blast-radius`: Analyze the impact and risk of a change
//! - `chain-reliability`: Compound reliability of a tool's dependency chain
//! - `graph`: Summarize or export the whole graph
//! - `cycles`: Detect dependency cycles
//! - `order`: Compute a dependency-first build order
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--registry <PATH>`: Read this registry instead of discovering `.toolweb/`
//!
//! # Example
//!
//! ```bash
//! toolweb deps deploy --transitive
//! toolweb path deploy vault
//! toolweb blast-radius postgres --json
//! toolweb chain-reliability deploy --threshold 0.95
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{AllPathsArgs, DepsArgs, InitArgs, PathArgs, ReliabilityArgs, ToolArgs};

// Re-export validators for external use
pub use validators::{validate_limit, validate_threshold, validate_tool_id};

use execute::Direction;

/// Toolweb - dependency graph analysis for a tool ecosystem
///
/// Answers which tools depend on which, what breaks when one changes, and how
/// reliable a tool's dependency chain is. Tools and dependencies are read from
/// `.toolweb/registry.jsonl`.
#[derive(Parser, Debug)]
#[command(name = "toolweb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Registry file to read instead of the discovered `.toolweb/` repository
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new toolweb repository
    ///
    /// Creates the `.toolweb/` directory with default configuration and an
    /// empty registry.
    Init(InitArgs),

    /// List what a tool depends on
    ///
    /// Shows direct dependencies, or every transitive dependency with its
    /// hop count when `--transitive` or `--depth` is given.
    Deps(DepsArgs),

    /// List what depends on a tool
    ///
    /// Shows direct dependents, or every transitive dependent with its hop
    /// count when `--transitive` or `--depth` is given.
    Rdeps(DepsArgs),

    /// Find the shortest dependency path between two tools
    Path(PathArgs),

    /// List simple dependency paths between two tools
    Allpaths(AllPathsArgs),

    /// List every tool affected by a change to a tool
    Affected(ToolArgs),

    /// Analyze the blast radius of changing a tool
    ///
    /// Reports affected tools by depth and type, a risk score and level, and
    /// an ordered list of verification steps.
    BlastRadius(ToolArgs),

    /// Compute the compound reliability of a tool's dependency chain
    ChainReliability(ReliabilityArgs),

    /// Show graph statistics, or export the whole graph with `--json`
    Graph,

    /// Detect dependency cycles
    Cycles,

    /// Compute a build order with dependencies first
    Order,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            None => {
                println!("toolweb - dependency graph analysis for a tool ecosystem");
                println!("Run 'toolweb --help' for usage information.");
                Ok(())
            }
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Deps(args)) => {
                let app = self.load_app().await?;
                execute::execute_neighbors(&app, args, Direction::Dependencies, output_mode)
            }
            Some(Commands::Rdeps(args)) => {
                let app = self.load_app().await?;
                execute::execute_neighbors(&app, args, Direction::Dependents, output_mode)
            }
            Some(Commands::Path(args)) => {
                let app = self.load_app().await?;
                execute::execute_path(&app, args, output_mode)
            }
            Some(Commands::Allpaths(args)) => {
                let app = self.load_app().await?;
                execute::execute_all_paths(&app, args, output_mode)
            }
            Some(Commands::Affected(args)) => {
                let app = self.load_app().await?;
                execute::execute_affected(&app, args, output_mode)
            }
            Some(Commands::BlastRadius(args)) => {
                let app = self.load_app().await?;
                execute::execute_blast_radius(&app, args, output_mode)
            }
            Some(Commands::ChainReliability(args)) => {
                let app = self.load_app().await?;
                execute::execute_chain_reliability(&app, args, output_mode)
            }
            Some(Commands::Graph) => {
                let app = self.load_app().await?;
                execute::execute_graph(&app, output_mode)
            }
            Some(Commands::Cycles) => {
                let app = self.load_app().await?;
                execute::execute_cycles(&app, output_mode)
            }
            Some(Commands::Order) => {
                let app = self.load_app().await?;
                execute::execute_order(&app, output_mode)
            }
        }
    }

    async fn load_app(&self) -> Result<crate::app::App> {
        use crate::app::App;

        let app = match &self.registry {
            Some(path) => App::from_registry(path).await?,
            None => App::from_directory(&std::env::current_dir()?).await?,
        };
        Ok(app)
    }
}
