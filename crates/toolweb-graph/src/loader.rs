//! Graph loader for building a snapshot from tool and edge records.
//!
//! Loading never fails. Records that are inconsistent with each other are
//! repaired or skipped, and every such decision is reported as a
//! [`LoadWarning`] so the caller can surface it.

use crate::domain::{DependencyEdge, ToolNode};
use crate::graph::ToolGraph;
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;

/// Non-fatal data problems found while loading.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// A second tool record reused an id.
    ///
    /// **Effect**: The first record is kept; the duplicate is dropped.
    DuplicateTool {
        /// The reused id
        id: String,
    },

    /// A tool declared a reliability outside `[0, 1]`.
    ///
    /// **Effect**: The value is clamped into range (non-finite becomes 0).
    ReliabilityClamped {
        /// Tool id
        id: String,
        /// Value found in the record
        declared: f64,
        /// Value stored in the graph
        used: f64,
    },

    /// A second edge record connected the same consumer and provider.
    ///
    /// **Effect**: The first record is kept; the duplicate is dropped.
    DuplicateEdge {
        /// Consumer id
        from: String,
        /// Provider id
        to: String,
    },

    /// An edge references a tool that is not registered.
    ///
    /// **Effect**: The edge stays in the edge list but is ignored by every
    /// traversal.
    DanglingEdge {
        /// Consumer id
        from: String,
        /// Provider id
        to: String,
    },

    /// A placeholder tool was created for an unregistered edge endpoint.
    ///
    /// **Effect**: The edge is traversable; the stub has default reliability.
    StubSynthesized {
        /// Id of the created stub
        id: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTool { id } => write!(f, "duplicate tool '{id}' ignored"),
            Self::ReliabilityClamped { id, declared, used } => write!(
                f,
                "tool '{id}' reliability {declared} out of range, using {used}"
            ),
            Self::DuplicateEdge { from, to } => {
                write!(f, "duplicate dependency {from} -> {to} ignored")
            }
            Self::DanglingEdge { from, to } => {
                write!(f, "dependency {from} -> {to} references an unknown tool")
            }
            Self::StubSynthesized { id } => write!(f, "created stub for unregistered tool '{id}'"),
        }
    }
}

/// A freshly built snapshot together with the warnings raised building it.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    /// The immutable snapshot
    pub graph: ToolGraph,
    /// Problems found in the input, in input order
    pub warnings: Vec<LoadWarning>,
}

/// Builds [`ToolGraph`] snapshots.
///
/// Loading is O(N + E):
/// 1. Add every tool as a node
/// 2. Resolve every edge against the id index
#[derive(Debug, Clone, Default)]
pub struct GraphLoader {
    synthesize_stubs: bool,
}

impl GraphLoader {
    /// Creates a loader that keeps dangling edges out of traversal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates stub tools for unknown edge endpoints instead of leaving the
    /// edge dangling.
    #[must_use]
    pub fn synthesize_stubs(mut self, enabled: bool) -> Self {
        self.synthesize_stubs = enabled;
        self
    }

    /// Builds a snapshot from tool and edge records.
    pub fn load(&self, nodes: Vec<ToolNode>, edges: Vec<DependencyEdge>) -> LoadedGraph {
        let mut graph = ToolGraph::empty();
        let mut warnings = Vec::new();

        // First pass: tools
        for mut node in nodes {
            if graph.node_map.contains_key(&node.id) {
                warnings.push(LoadWarning::DuplicateTool { id: node.id });
                continue;
            }

            if !(0.0..=1.0).contains(&node.reliability) {
                let used = if node.reliability.is_finite() {
                    node.reliability.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                warnings.push(LoadWarning::ReliabilityClamped {
                    id: node.id.clone(),
                    declared: node.reliability,
                    used,
                });
                node.reliability = used;
            }

            let id = node.id.clone();
            let index = graph.graph.add_node(node);
            graph.node_map.insert(id, index);
        }

        // Second pass: edges
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for edge in edges {
            if !seen.insert((edge.from.clone(), edge.to.clone())) {
                warnings.push(LoadWarning::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
                continue;
            }

            if self.synthesize_stubs {
                for endpoint in [&edge.from, &edge.to] {
                    if !graph.node_map.contains_key(endpoint) {
                        let index = graph.graph.add_node(ToolNode::stub(endpoint.clone()));
                        graph.node_map.insert(endpoint.clone(), index);
                        warnings.push(LoadWarning::StubSynthesized {
                            id: endpoint.clone(),
                        });
                    }
                }
            }

            match (graph.index_of(&edge.from), graph.index_of(&edge.to)) {
                (Some(from), Some(to)) => {
                    graph.graph.add_edge(from, to, edge.clone());
                }
                _ => {
                    warnings.push(LoadWarning::DanglingEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                    });
                    graph.dangling.push(graph.edges.len());
                }
            }
            graph.edges.push(edge);
        }

        graph.loaded_at = Utc::now();

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dangling = graph.dangling_edge_count(),
            warnings = warnings.len(),
            "Loaded tool graph"
        );

        LoadedGraph { graph, warnings }
    }
}

impl ToolGraph {
    /// Builds a snapshot with the default loader, logging any warnings.
    pub fn load(nodes: Vec<ToolNode>, edges: Vec<DependencyEdge>) -> ToolGraph {
        let LoadedGraph { graph, warnings } = GraphLoader::new().load(nodes, edges);
        for warning in &warnings {
            tracing::warn!(%warning, "Tool graph load warning");
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyType, ToolType};

    fn tool(id: &str) -> ToolNode {
        ToolNode::new(id, ToolType::Cli)
    }

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge::new(from, to, DependencyType::Cli)
    }

    #[test]
    fn test_load_empty() {
        let loaded = GraphLoader::new().load(vec![], vec![]);
        assert_eq!(loaded.graph.node_count(), 0);
        assert_eq!(loaded.graph.edge_count(), 0);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_tool_keeps_first() {
        let loaded = GraphLoader::new().load(
            vec![tool("a").with_name("first"), tool("a").with_name("second")],
            vec![],
        );

        assert_eq!(loaded.graph.node_count(), 1);
        assert_eq!(loaded.graph.get_node("a").unwrap().name, "first");
        assert_eq!(
            loaded.warnings,
            [LoadWarning::DuplicateTool { id: "a".to_string() }]
        );
    }

    #[test]
    fn test_duplicate_edge_keeps_first() {
        let loaded = GraphLoader::new().load(
            vec![tool("a"), tool("b")],
            vec![edge("a", "b"), edge("a", "b").optional()],
        );

        assert_eq!(loaded.graph.edge_count(), 1);
        assert!(!loaded.graph.get_edge("a", "b").unwrap().optional);
        assert!(matches!(
            loaded.warnings[0],
            LoadWarning::DuplicateEdge { .. }
        ));
    }

    #[test]
    fn test_reliability_is_clamped() {
        let loaded = GraphLoader::new().load(
            vec![
                tool("high").with_reliability(1.5),
                tool("low").with_reliability(-0.2),
                tool("nan").with_reliability(f64::NAN),
            ],
            vec![],
        );

        let graph = &loaded.graph;
        assert!((graph.get_node("high").unwrap().reliability - 1.0).abs() < f64::EPSILON);
        assert!(graph.get_node("low").unwrap().reliability.abs() < f64::EPSILON);
        assert!(graph.get_node("nan").unwrap().reliability.abs() < f64::EPSILON);
        assert_eq!(loaded.warnings.len(), 3);
    }

    #[test]
    fn test_dangling_edge_without_stubs() {
        let loaded = GraphLoader::new().load(vec![tool("a")], vec![edge("a", "ghost")]);

        assert_eq!(loaded.graph.node_count(), 1);
        assert_eq!(loaded.graph.edge_count(), 1);
        assert_eq!(loaded.graph.dangling_edge_count(), 1);
        assert!(loaded.graph.dependencies("a").is_empty());
        assert_eq!(
            loaded.warnings,
            [LoadWarning::DanglingEdge {
                from: "a".to_string(),
                to: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn test_stub_synthesis() {
        let loaded = GraphLoader::new()
            .synthesize_stubs(true)
            .load(vec![tool("a")], vec![edge("a", "ghost"), edge("b", "ghost")]);

        let graph = &loaded.graph;
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.dangling_edge_count(), 0);
        assert!(graph.get_node("ghost").unwrap().stub);
        assert!(graph.get_node("b").unwrap().stub);
        assert_eq!(graph.dependencies("a")[0].id, "ghost");
        assert_eq!(
            loaded
                .warnings
                .iter()
                .filter(|w| matches!(w, LoadWarning::StubSynthesized { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = LoadWarning::DanglingEdge {
            from: "a".to_string(),
            to: "b".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "dependency a -> b references an unknown tool"
        );
    }
}
