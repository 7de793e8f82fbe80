//! Toolweb Graph - dependency graph engine for tool ecosystems.
//!
//! This crate turns a flat set of tool records and dependency edges into an
//! immutable, queryable graph snapshot and answers blast-radius questions
//! over it:
//!
//! - What does a tool need? ([`ToolGraph::transitive_dependencies`])
//! - What breaks if it changes? ([`ToolGraph::analyze_impact`])
//! - How reliable is its chain? ([`ToolGraph::chain_reliability`])
//!
//! # Architecture
//!
//! The snapshot wraps a petgraph `DiGraph` whose edges run from consumer to
//! provider, plus a string id index. Outgoing edges form the forward
//! ("depends on") adjacency and incoming edges the backward ("depended on
//! by") adjacency. The graph may contain cycles and self-loops; every
//! algorithm here terminates on them.
//!
//! # Example
//!
//! ```
//! use toolweb_graph::{DependencyEdge, DependencyType, ToolGraph, ToolNode, ToolType};
//!
//! let graph = ToolGraph::load(
//!     vec![
//!         ToolNode::new("deploy", ToolType::Cli),
//!         ToolNode::new("registry", ToolType::Mcp),
//!     ],
//!     vec![DependencyEdge::new("deploy", "registry", DependencyType::Mcp)],
//! );
//!
//! assert_eq!(graph.find_path("deploy", "registry").unwrap(), ["deploy", "registry"]);
//! assert_eq!(graph.transitive_dependents("registry").len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod cycles;
pub mod domain;
pub mod error;
pub mod export;
pub mod graph;
pub mod impact;
pub mod loader;
pub mod paths;
pub mod reliability;
pub mod topo;
pub mod traversal;

pub use cycles::Cycle;
pub use domain::{DEFAULT_RELIABILITY, DependencyEdge, DependencyType, ToolNode, ToolType};
pub use error::{Error, Result};
pub use export::{ExportMetadata, GraphExport};
pub use graph::{GraphStats, ToolGraph};
pub use impact::{AffectedTool, ImpactOptions, ImpactReport, RiskAssessment, RiskLevel, TypeImpact};
pub use loader::{GraphLoader, LoadWarning, LoadedGraph};
pub use paths::DEFAULT_PATH_LIMIT;
pub use reliability::{ChainReliability, DEFAULT_RELIABILITY_THRESHOLD, LinkReliability};
pub use topo::BuildOrder;
pub use traversal::Reached;
