//! Domain types for the tool dependency graph.
//!
//! Field names of [`ToolNode`] and [`DependencyEdge`] serialize in camelCase
//! and are part of the JSON contract consumed by `--json` output, so every
//! field is always present (optional values serialize as `null`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reliability assumed for a tool that does not declare one.
pub const DEFAULT_RELIABILITY: f64 = 0.95;

/// Kind of a registered tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    /// Command-line executable.
    Cli,

    /// Live-integration server speaking the Model Context Protocol.
    Mcp,

    /// Linked or imported library.
    Library,

    /// Long-running network service.
    Service,

    /// Database or other datastore.
    Database,

    /// Script invoked by other tools.
    Script,

    /// Anything else, including synthesized stubs.
    #[default]
    Other,
}

impl ToolType {
    /// Every tool type, in declaration order.
    pub const ALL: [ToolType; 7] = [
        ToolType::Cli,
        ToolType::Mcp,
        ToolType::Library,
        ToolType::Service,
        ToolType::Database,
        ToolType::Script,
        ToolType::Other,
    ];

    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Mcp => "mcp",
            Self::Library => "library",
            Self::Service => "service",
            Self::Database => "database",
            Self::Script => "script",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tool type '{s}'"))
    }
}

/// Kind of a dependency relationship. Informational only; no algorithm
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// Shells out to a command-line tool.
    Cli,

    /// Calls an MCP server.
    Mcp,

    /// Links or imports a library.
    Library,

    /// Reads or writes a database.
    Database,

    /// Calls a remote API.
    Api,

    /// Talks to a long-running service.
    Service,

    /// Unclassified.
    #[default]
    Other,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cli => "cli",
            Self::Mcp => "mcp",
            Self::Library => "library",
            Self::Database => "database",
            Self::Api => "api",
            Self::Service => "service",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

fn default_reliability() -> f64 {
    DEFAULT_RELIABILITY
}

/// A registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolNode {
    /// Unique, stable identity. Also used as the import/display name.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Tool kind.
    #[serde(rename = "type", default)]
    pub tool_type: ToolType,

    /// Declared version, if any.
    #[serde(default)]
    pub version: Option<String>,

    /// Estimated independent availability in `[0, 1]`.
    #[serde(default = "default_reliability")]
    pub reliability: f64,

    /// Architectural-debt weight.
    #[serde(default)]
    pub debt_score: u32,

    /// True when the node was synthesized for an unregistered edge endpoint.
    #[serde(default)]
    pub stub: bool,
}

impl ToolNode {
    /// Creates a tool whose name equals its id, with default reliability.
    pub fn new(id: impl Into<String>, tool_type: ToolType) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            tool_type,
            version: None,
            reliability: DEFAULT_RELIABILITY,
            debt_score: 0,
            stub: false,
        }
    }

    /// Creates a placeholder for a tool referenced by an edge but never
    /// registered.
    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            stub: true,
            ..Self::new(id, ToolType::Other)
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the declared version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the reliability estimate.
    #[must_use]
    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = reliability;
        self
    }

    /// Sets the debt score.
    #[must_use]
    pub fn with_debt_score(mut self, debt_score: u32) -> Self {
        self.debt_score = debt_score;
        self
    }
}

/// A directed "consumer depends on provider" relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    /// The consumer.
    #[serde(alias = "consumerId")]
    pub from: String,

    /// The provider.
    #[serde(alias = "providerId")]
    pub to: String,

    /// Relationship kind.
    #[serde(rename = "type", default)]
    pub dep_type: DependencyType,

    /// Version requirement on the provider, if declared.
    #[serde(default)]
    pub version_constraint: Option<String>,

    /// Whether the consumer still works without the provider.
    #[serde(default)]
    pub optional: bool,
}

impl DependencyEdge {
    /// Creates a required edge with no version constraint.
    pub fn new(from: impl Into<String>, to: impl Into<String>, dep_type: DependencyType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            dep_type,
            version_constraint: None,
            optional: false,
        }
    }

    /// Sets the version constraint.
    #[must_use]
    pub fn with_version_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.version_constraint = Some(constraint.into());
        self
    }

    /// Marks the edge optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_tool_node_serializes_every_field_in_camel_case() {
        let node = ToolNode::new("gh", ToolType::Cli).with_debt_score(3);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], "gh");
        assert_eq!(json["type"], "cli");
        assert_eq!(json["debtScore"], 3);
        assert!(json["version"].is_null());
        assert_eq!(json["stub"], false);
    }

    #[test]
    fn test_tool_node_defaults_when_fields_missing() {
        let node: ToolNode = serde_json::from_str(r#"{"id":"jq","name":"jq"}"#).unwrap();

        assert_eq!(node.tool_type, ToolType::Other);
        assert!((node.reliability - DEFAULT_RELIABILITY).abs() < f64::EPSILON);
        assert_eq!(node.debt_score, 0);
        assert!(!node.stub);
    }

    #[test]
    fn test_edge_accepts_consumer_provider_aliases() {
        let edge: DependencyEdge = serde_json::from_str(
            r#"{"consumerId":"a","providerId":"b","type":"library","optional":true}"#,
        )
        .unwrap();

        assert_eq!(edge.from, "a");
        assert_eq!(edge.to, "b");
        assert_eq!(edge.dep_type, DependencyType::Library);
        assert!(edge.optional);
    }

    #[test]
    fn test_stub_is_flagged() {
        let stub = ToolNode::stub("ghost");
        assert!(stub.stub);
        assert_eq!(stub.name, "ghost");
        assert_eq!(stub.tool_type, ToolType::Other);
    }

    #[rstest]
    #[case("cli", ToolType::Cli)]
    #[case("MCP", ToolType::Mcp)]
    #[case("Database", ToolType::Database)]
    fn test_tool_type_from_str(#[case] input: &str, #[case] expected: ToolType) {
        assert_eq!(input.parse::<ToolType>().unwrap(), expected);
    }

    #[test]
    fn test_tool_type_from_str_rejects_unknown() {
        assert!("widget".parse::<ToolType>().is_err());
    }
}
