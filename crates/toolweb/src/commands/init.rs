//! Implementation of the `init` command.
//!
//! Creates the `.toolweb/` directory with a default configuration and an
//! empty registry.

use crate::config::{CONFIG_FILE_NAME, REGISTRY_FILE_NAME, TOOLWEB_DIR_NAME, ToolwebConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created toolweb directory
    pub toolweb_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created registry file
    pub registry_file: PathBuf,
}

/// Initialize a new toolweb repository in the given directory.
///
/// # Errors
///
/// Returns an error if `.toolweb/` already exists or a file system
/// operation fails.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let toolweb_dir = base_dir.join(TOOLWEB_DIR_NAME);

    if toolweb_dir.exists() {
        return Err(Error::Config(format!(
            "Toolweb is already initialized in this directory. Found existing '{TOOLWEB_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&toolweb_dir).await?;

    let config_file = toolweb_dir.join(CONFIG_FILE_NAME);
    ToolwebConfig::default().save(&config_file).await?;

    let registry_file = toolweb_dir.join(REGISTRY_FILE_NAME);
    fs::write(&registry_file, "").await?;

    tracing::debug!(dir = %toolweb_dir.display(), "Initialized toolweb repository");

    Ok(InitResult {
        toolweb_dir,
        config_file,
        registry_file,
    })
}
