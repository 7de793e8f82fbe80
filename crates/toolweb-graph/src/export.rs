//! JSON export of a graph snapshot.
//!
//! The export is the stable interchange shape used by `toolweb graph --json`:
//!
//! ```json
//! {
//!   "nodes": [ ... ],
//!   "edges": [ ... ],
//!   "metadata": { "nodeCount": 2, "edgeCount": 1, "danglingEdgeCount": 0,
//!                 "loadedAt": "2026-01-01T00:00:00Z" }
//! }
//! ```
//!
//! Nodes appear in load order, edges in load order including dangling ones.

use crate::domain::{DependencyEdge, ToolNode};
use crate::error::Result;
use crate::graph::ToolGraph;
use crate::loader::{GraphLoader, LoadedGraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counts and timestamp describing an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// Number of exported tools
    pub node_count: usize,
    /// Number of exported dependencies, dangling ones included
    pub edge_count: usize,
    /// Dependencies with an unregistered endpoint
    pub dangling_edge_count: usize,
    /// When the snapshot was built (RFC 3339, UTC)
    pub loaded_at: DateTime<Utc>,
}

/// A borrowed view of a snapshot, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport<'g> {
    /// Tools ordered by id
    pub nodes: Vec<&'g ToolNode>,
    /// Dependencies in input order
    pub edges: &'g [DependencyEdge],
    /// Counts and timestamp
    pub metadata: ExportMetadata,
}

/// Owned form of [`GraphExport`] for reading an export back.
#[derive(Debug, Deserialize)]
struct ExportRecords {
    nodes: Vec<ToolNode>,
    edges: Vec<DependencyEdge>,
}

impl ToolGraph {
    /// Builds an export view of this snapshot.
    pub fn export(&self) -> GraphExport<'_> {
        GraphExport {
            nodes: self.all_nodes(),
            edges: self.all_edges(),
            metadata: ExportMetadata {
                node_count: self.node_count(),
                edge_count: self.edge_count(),
                dangling_edge_count: self.dangling_edge_count(),
                loaded_at: self.loaded_at(),
            },
        }
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Rebuilds a snapshot from JSON produced by [`to_json`](Self::to_json).
    ///
    /// The metadata block is ignored; counts are recomputed by the loader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// input is not a valid export.
    pub fn from_json(json: &str, loader: &GraphLoader) -> Result<LoadedGraph> {
        let records: ExportRecords = serde_json::from_str(json)?;
        Ok(loader.load(records.nodes, records.edges))
    }
}
