//! Core graph store.
//!
//! `ToolGraph` wraps a petgraph `DiGraph` and adds an id index for O(1)
//! lookups. It is built once by [`GraphLoader`](crate::loader::GraphLoader)
//! and never mutated afterwards; every query module borrows it immutably.
//!
//! # Edge Direction
//!
//! Edges point from **consumer -> provider** (source depends on target):
//! - `Direction::Outgoing` walks dependencies
//! - `Direction::Incoming` walks dependents

use crate::domain::{DependencyEdge, ToolNode};
use chrono::{DateTime, Utc};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// An immutable snapshot of the tool dependency graph.
#[derive(Debug, Clone)]
pub struct ToolGraph {
    /// Tools as node weights, traversable edges as edge weights.
    pub(crate) graph: DiGraph<ToolNode, DependencyEdge>,

    /// Maps tool ids to graph node indexes.
    pub(crate) node_map: HashMap<String, NodeIndex>,

    /// Every accepted edge record in load order, including dangling ones.
    pub(crate) edges: Vec<DependencyEdge>,

    /// Positions in `edges` whose endpoints are not both known tools.
    pub(crate) dangling: Vec<usize>,

    pub(crate) loaded_at: DateTime<Utc>,
}

impl ToolGraph {
    pub(crate) fn empty() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            edges: Vec::new(),
            dangling: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Returns true if a tool with this id is in the snapshot.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Gets a tool by id.
    pub fn get_node(&self, id: &str) -> Option<&ToolNode> {
        let index = self.node_map.get(id)?;
        self.graph.node_weight(*index)
    }

    /// Returns every tool in load order.
    pub fn all_nodes(&self) -> Vec<&ToolNode> {
        self.graph.node_weights().collect()
    }

    /// Gets the edge from `from` to `to`, including dangling edges.
    pub fn get_edge(&self, from: &str, to: &str) -> Option<&DependencyEdge> {
        if let (Some(&a), Some(&b)) = (self.node_map.get(from), self.node_map.get(to)) {
            if let Some(edge) = self.graph.find_edge(a, b) {
                return self.graph.edge_weight(edge);
            }
        }

        self.dangling_edges().find(|edge| edge.from == from && edge.to == to)
    }

    /// Returns every edge record in load order, including dangling ones.
    pub fn all_edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Iterates over edges that reference at least one unknown tool.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dangling.iter().map(|&i| &self.edges[i])
    }

    /// Returns the number of tools.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edge records, including dangling ones.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of edges ignored for traversal because an
    /// endpoint is not a known tool.
    pub fn dangling_edge_count(&self) -> usize {
        self.dangling.len()
    }

    /// When this snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Gets tools this tool directly depends on, sorted by name (ignoring
    /// case), then id.
    ///
    /// Unknown ids yield an empty list.
    pub fn dependencies(&self, id: &str) -> Vec<&ToolNode> {
        self.direct_neighbors(id, Direction::Outgoing)
    }

    /// Gets tools that directly depend on this tool, sorted by name
    /// (ignoring case), then id.
    ///
    /// Unknown ids yield an empty list.
    pub fn dependents(&self, id: &str) -> Vec<&ToolNode> {
        self.direct_neighbors(id, Direction::Incoming)
    }

    fn direct_neighbors(&self, id: &str, direction: Direction) -> Vec<&ToolNode> {
        let Some(&index) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut nodes: Vec<&ToolNode> = self
            .graph
            .neighbors_directed(index, direction)
            .map(|n| &self.graph[n])
            .collect();
        nodes.sort_by(|a, b| by_name(a, b));
        nodes
    }

    /// Gets the node index for a tool id.
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Gets the id stored at a node index.
    pub(crate) fn id_at(&self, index: NodeIndex) -> &str {
        &self.graph[index].id
    }

    /// Neighbour indexes in one direction, ordered by tool id.
    ///
    /// Sorting keeps DFS-based results independent of petgraph's internal
    /// edge list order.
    pub(crate) fn sorted_neighbors(&self, index: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> =
            self.graph.neighbors_directed(index, direction).collect();
        neighbors.sort_by(|a, b| self.id_at(*a).cmp(self.id_at(*b)));
        neighbors.dedup();
        neighbors
    }

    /// Node indexes ordered by tool id.
    pub(crate) fn sorted_indexes(&self) -> Vec<NodeIndex> {
        let mut indexes: Vec<NodeIndex> = self.graph.node_indices().collect();
        indexes.sort_by(|a, b| self.id_at(*a).cmp(self.id_at(*b)));
        indexes
    }
}

/// Display order for tools: name ignoring case, then exact name, then id.
pub(crate) fn by_name(a: &ToolNode, b: &ToolNode) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Summary counts for the `graph` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Registered tools, stubs included.
    pub node_count: usize,
    /// Dependency records, dangling ones included.
    pub edge_count: usize,
    /// Dependencies with an unregistered endpoint.
    pub dangling_edge_count: usize,
    /// Placeholder tools created for unregistered endpoints.
    pub stub_count: usize,
    /// Cycles reported by `find_cycles`.
    pub cycle_count: usize,
    /// Tools with no dependencies.
    pub leaf_count: usize,
    /// Tools nothing depends on.
    pub root_count: usize,
}

impl ToolGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let graph = &self.graph;
        let leaf_count = graph
            .node_indices()
            .filter(|&n| graph.neighbors_directed(n, Direction::Outgoing).next().is_none())
            .count();
        let root_count = graph
            .node_indices()
            .filter(|&n| graph.neighbors_directed(n, Direction::Incoming).next().is_none())
            .count();

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            dangling_edge_count: self.dangling_edge_count(),
            stub_count: graph.node_weights().filter(|n| n.stub).count(),
            cycle_count: self.find_cycles().len(),
            leaf_count,
            root_count,
        }
    }
}
