//! Repository configuration.
//!
//! Configuration lives in `.toolweb/config.yaml`. Every key is optional;
//! missing keys take the defaults below, so a hand-written config only has
//! to mention what it changes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use toolweb_graph::{
    DEFAULT_PATH_LIMIT, DEFAULT_RELIABILITY_THRESHOLD, GraphLoader, ImpactOptions, ToolType,
};

/// Name of the toolweb directory
pub const TOOLWEB_DIR_NAME: &str = ".toolweb";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the registry data file
pub const REGISTRY_FILE_NAME: &str = "registry.jsonl";

/// Maximum directory depth to traverse when searching for the toolweb root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for toolweb
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ToolwebConfig {
    /// Registry path, relative to the repository root
    pub registry: String,

    /// Tool type whose dependents are treated as critical by `blast-radius`
    pub critical_type: ToolType,

    /// Default cap for `allpaths`
    pub path_limit: usize,

    /// Default threshold for `chain-reliability`
    pub reliability_threshold: f64,

    /// Debt score at or above which a dependent is flagged
    pub high_debt_threshold: u32,

    /// Chain reliability below which `blast-radius` warns
    pub low_reliability_threshold: f64,

    /// Create stub tools for edges that reference unregistered tools
    pub synthesize_stubs: bool,
}

impl Default for ToolwebConfig {
    fn default() -> Self {
        let impact = ImpactOptions::default();
        Self {
            registry: format!("{TOOLWEB_DIR_NAME}/{REGISTRY_FILE_NAME}"),
            critical_type: impact.critical_type,
            path_limit: DEFAULT_PATH_LIMIT,
            reliability_threshold: DEFAULT_RELIABILITY_THRESHOLD,
            high_debt_threshold: impact.high_debt_threshold,
            low_reliability_threshold: impact.low_reliability_threshold,
            synthesize_stubs: false,
        }
    }
}

impl ToolwebConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check values that YAML typing alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if self.path_limit == 0 {
            return Err(Error::Config("path-limit must be at least 1".to_string()));
        }

        for (key, value) in [
            ("reliability-threshold", self.reliability_threshold),
            ("low-reliability-threshold", self.low_reliability_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{key} must be between 0 and 1, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Resolve the registry path against the repository root.
    pub fn registry_path(&self, root: &Path) -> PathBuf {
        root.join(&self.registry)
    }

    /// Impact analysis options derived from this configuration.
    pub fn impact_options(&self) -> ImpactOptions {
        ImpactOptions {
            critical_type: self.critical_type,
            high_debt_threshold: self.high_debt_threshold,
            low_reliability_threshold: self.low_reliability_threshold,
        }
    }

    /// Graph loader configured from this configuration.
    pub fn loader(&self) -> GraphLoader {
        GraphLoader::new().synthesize_stubs(self.synthesize_stubs)
    }
}

/// Check if a directory has been initialized with toolweb.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TOOLWEB_DIR_NAME).exists()
}

/// Find the toolweb root directory by searching up the directory tree.
///
/// Returns the directory containing `.toolweb/`, or `None` if none is found
/// within [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_toolweb_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TOOLWEB_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    // ========== ToolwebConfig Tests ==========

    #[test]
    fn test_config_default() {
        let config = ToolwebConfig::default();
        assert_eq!(config.registry, ".toolweb/registry.jsonl");
        assert_eq!(config.critical_type, ToolType::Mcp);
        assert_eq!(config.path_limit, 10);
        assert_eq!(config.high_debt_threshold, 7);
        assert!(!config.synthesize_stubs);
    }

    #[tokio::test]
    async fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let original = ToolwebConfig {
            critical_type: ToolType::Service,
            path_limit: 3,
            ..ToolwebConfig::default()
        };
        original.save(&config_path).await.unwrap();

        let loaded = ToolwebConfig::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_yaml_uses_kebab_case() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        ToolwebConfig::default().save(&config_path).await.unwrap();
        let content = tokio::fs::read_to_string(&config_path).await.unwrap();

        assert!(content.contains("registry: .toolweb/registry.jsonl"));
        assert!(content.contains("critical-type: mcp"));
        assert!(content.contains("path-limit: 10"));
        assert!(content.contains("synthesize-stubs: false"));
    }

    #[tokio::test]
    async fn test_partial_config_takes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        tokio::fs::write(&config_path, "synthesize-stubs: true\n")
            .await
            .unwrap();

        let config = ToolwebConfig::load(&config_path).await.unwrap();
        assert!(config.synthesize_stubs);
        assert_eq!(config.path_limit, DEFAULT_PATH_LIMIT);
    }

    #[rstest]
    #[case::zero_limit("path-limit: 0\n", "path-limit")]
    #[case::threshold_too_high("reliability-threshold: 1.5\n", "reliability-threshold")]
    #[case::unknown_type("critical-type: widget\n", "widget")]
    #[tokio::test]
    async fn test_invalid_config(#[case] yaml: &str, #[case] expected: &str) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        tokio::fs::write(&config_path, yaml).await.unwrap();

        let err = ToolwebConfig::load(&config_path).await.unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "Expected error to contain '{expected}', got: '{err}'"
        );
    }

    #[test]
    fn test_impact_options_follow_config() {
        let config = ToolwebConfig {
            critical_type: ToolType::Database,
            high_debt_threshold: 3,
            ..ToolwebConfig::default()
        };

        let options = config.impact_options();
        assert_eq!(options.critical_type, ToolType::Database);
        assert_eq!(options.high_debt_threshold, 3);
    }

    // ========== Root Discovery Tests ==========

    #[test]
    fn test_find_root_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(TOOLWEB_DIR_NAME)).unwrap();

        assert!(is_initialized(temp_dir.path()));
        assert_eq!(
            find_toolweb_root(temp_dir.path()),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_find_root_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(TOOLWEB_DIR_NAME)).unwrap();

        let sub_dir = temp_dir.path().join("sub").join("nested");
        std::fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(
            find_toolweb_root(&sub_dir),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_find_root_not_found() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!is_initialized(temp_dir.path()));
        assert!(find_toolweb_root(temp_dir.path()).is_none());
    }
}
