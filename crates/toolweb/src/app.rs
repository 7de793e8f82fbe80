//! Application context for CLI command execution.
//!
//! `App` resolves the configuration, reads the registry and builds the
//! graph snapshot once per invocation. Commands then run read-only queries
//! against [`App::graph`].
//!
//! # Example
//!
//! ```no_run
//! use toolweb::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} tools", app.graph().node_count());
//!     Ok(())
//! }
//! ```

use crate::config::{CONFIG_FILE_NAME, TOOLWEB_DIR_NAME, ToolwebConfig, find_toolweb_root};
use crate::error::{Error, Result};
use crate::registry::{RegistryWarning, load_registry};
use std::path::{Path, PathBuf};
use toolweb_graph::{LoadWarning, LoadedGraph, ToolGraph, ToolNode};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    config: ToolwebConfig,
    registry_path: PathBuf,
    graph: ToolGraph,
    registry_warnings: Vec<RegistryWarning>,
    load_warnings: Vec<LoadWarning>,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.toolweb/`, loads its
    /// configuration, and builds the graph from the configured registry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No toolweb repository is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The registry cannot be read
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_toolweb_root(working_dir).ok_or(Error::NotInitialized)?;
        let config_path = root_dir.join(TOOLWEB_DIR_NAME).join(CONFIG_FILE_NAME);

        let config = ToolwebConfig::load(&config_path).await?;
        let registry_path = config.registry_path(&root_dir);

        Self::build(config, registry_path).await
    }

    /// Create an App from an explicit registry file, using default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub async fn from_registry(registry_path: &Path) -> Result<Self> {
        Self::build(ToolwebConfig::default(), registry_path.to_path_buf()).await
    }

    async fn build(config: ToolwebConfig, registry_path: PathBuf) -> Result<Self> {
        let registry = load_registry(&registry_path).await?;
        for warning in &registry.warnings {
            tracing::warn!(%warning, path = %registry_path.display(), "Registry warning");
        }

        let LoadedGraph { graph, warnings } = config
            .loader()
            .load(registry.tools, registry.dependencies);
        for warning in &warnings {
            tracing::warn!(%warning, "Tool graph load warning");
        }

        Ok(Self {
            config,
            registry_path,
            graph,
            registry_warnings: registry.warnings,
            load_warnings: warnings,
        })
    }

    /// Get the graph snapshot.
    pub fn graph(&self) -> &ToolGraph {
        &self.graph
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ToolwebConfig {
        &self.config
    }

    /// Get the path of the registry the graph was built from.
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Warnings raised while reading the registry and building the graph,
    /// rendered for display.
    pub fn warnings(&self) -> Vec<String> {
        self.registry_warnings
            .iter()
            .map(ToString::to_string)
            .chain(self.load_warnings.iter().map(ToString::to_string))
            .collect()
    }

    /// Look up a tool named on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the id is not in the registry.
    pub fn require_tool(&self, id: &str) -> Result<&ToolNode> {
        self.graph
            .get_node(id)
            .ok_or_else(|| Error::ToolNotFound(id.to_string()))
    }
}
