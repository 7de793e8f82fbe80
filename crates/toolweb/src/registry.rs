//! JSONL registry reader.
//!
//! The registry holds one record per line, tagged by its `record` field:
//!
//! ```text
//! {"record":"tool","id":"kubectl","name":"kubectl","type":"cli","reliability":0.99}
//! {"record":"dependency","from":"deploy","to":"kubectl","type":"cli"}
//! ```
//!
//! Reading is resilient: blank lines are skipped and a malformed line is
//! reported as a [`RegistryWarning`] instead of failing the whole load.
//! Only I/O failures are errors.

use crate::error::Result;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use toolweb_graph::{DependencyEdge, ToolNode};

/// One line of the registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "record", rename_all = "lowercase")]
pub enum RegistryRecord {
    /// `{"record":"tool", ...}`
    Tool(ToolNode),
    /// `{"record":"dependency", ...}`
    Dependency(DependencyEdge),
}

/// Non-fatal problems found while reading a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryWarning {
    /// A line could not be parsed as a registry record.
    ///
    /// **Effect**: The line is skipped.
    /// **Common causes**: Manual editing errors, unknown `record` tags.
    MalformedRecord {
        /// 1-based line number in the registry
        line_number: usize,
        /// Parser error message
        error: String,
    },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryWarning::MalformedRecord { line_number, error } => {
                write!(f, "skipped malformed record at line {line_number}: {error}")
            }
        }
    }
}

/// Records read from a registry, split by kind, in file order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Tool records
    pub tools: Vec<ToolNode>,
    /// Dependency records
    pub dependencies: Vec<DependencyEdge>,
    /// Lines that were skipped
    pub warnings: Vec<RegistryWarning>,
}

/// Read registry records from any async reader.
pub async fn read_registry<R: AsyncRead + Unpin>(reader: R) -> Result<Registry> {
    let mut lines = BufReader::new(reader).lines();
    let mut registry = Registry::default();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<RegistryRecord>(trimmed) {
            Ok(RegistryRecord::Tool(tool)) => registry.tools.push(tool),
            Ok(RegistryRecord::Dependency(edge)) => registry.dependencies.push(edge),
            Err(e) => registry.warnings.push(RegistryWarning::MalformedRecord {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    tracing::debug!(
        tools = registry.tools.len(),
        dependencies = registry.dependencies.len(),
        skipped = registry.warnings.len(),
        "Read registry"
    );

    Ok(registry)
}

/// Read a registry file.
pub async fn load_registry(path: &Path) -> Result<Registry> {
    let file = File::open(path).await?;
    read_registry(file).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use toolweb_graph::{DependencyType, ToolType};

    async fn read(data: &str) -> Registry {
        read_registry(Cursor::new(data.as_bytes().to_vec()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_tools_and_dependencies() {
        let registry = read(concat!(
            r#"{"record":"tool","id":"kubectl","name":"kubectl","type":"cli","reliability":0.99}"#,
            "\n",
            r#"{"record":"tool","id":"deploy","name":"Deploy","type":"script","debtScore":4}"#,
            "\n",
            r#"{"record":"dependency","from":"deploy","to":"kubectl","type":"cli"}"#,
            "\n",
        ))
        .await;

        assert_eq!(registry.tools.len(), 2);
        assert_eq!(registry.tools[0].tool_type, ToolType::Cli);
        assert_eq!(registry.tools[1].debt_score, 4);
        assert_eq!(
            registry.dependencies,
            [DependencyEdge::new("deploy", "kubectl", DependencyType::Cli)]
        );
        assert!(registry.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_take_defaults() {
        let registry = read(r#"{"record":"tool","id":"jq","name":"jq"}"#).await;

        let tool = &registry.tools[0];
        assert_eq!(tool.tool_type, ToolType::Other);
        assert!((tool.reliability - 0.95).abs() < f64::EPSILON);
        assert!(!tool.stub);
    }

    #[tokio::test]
    async fn test_accepts_consumer_provider_names() {
        let registry =
            read(r#"{"record":"dependency","consumerId":"a","providerId":"b","optional":true}"#)
                .await;

        let edge = &registry.dependencies[0];
        assert_eq!(edge.from, "a");
        assert_eq!(edge.to, "b");
        assert!(edge.optional);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped_with_warning() {
        let registry = read(concat!(
            r#"{"record":"tool","id":"a","name":"a"}"#,
            "\n",
            "\n",
            "not json\n",
            r#"{"record":"widget","id":"b"}"#,
            "\n",
            r#"{"record":"tool","id":"c","name":"c"}"#,
            "\n",
        ))
        .await;

        assert_eq!(registry.tools.len(), 2);
        assert_eq!(registry.warnings.len(), 2);
        assert!(matches!(
            registry.warnings[0],
            RegistryWarning::MalformedRecord { line_number: 3, .. }
        ));
        assert!(matches!(
            registry.warnings[1],
            RegistryWarning::MalformedRecord { line_number: 4, .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let registry = read("").await;
        assert!(registry.tools.is_empty());
        assert!(registry.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(
            load_registry(&temp_dir.path().join("missing.jsonl"))
                .await
                .is_err()
        );
    }
}
