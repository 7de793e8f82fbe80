//! Build order via Kahn's algorithm.
//!
//! A tool's in-degree here is the number of its dependencies that have not
//! been emitted yet. Tools with nothing outstanding are emitted, then each
//! of their dependents has its count decremented.
//!
//! Cycle members never reach zero, and neither does anything that depends
//! on them, so they are left out. The result is a partial order rather than
//! a failure; callers that need full coverage check
//! [`ToolGraph::has_cycle`] or use [`ToolGraph::build_order`].

use crate::graph::ToolGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::VecDeque;

/// A build order plus the tools that could not be placed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOrder {
    /// Tool ids, dependencies before dependents.
    pub order: Vec<String>,
    /// Tool ids excluded because they sit on, or depend on, a cycle.
    pub blocked: Vec<String>,
}

impl BuildOrder {
    /// Returns true if every tool was placed.
    pub fn is_complete(&self) -> bool {
        self.blocked.is_empty()
    }
}

impl ToolGraph {
    /// Orders tools so that every tool comes after all of its dependencies.
    ///
    /// Tools on or behind a cycle are silently omitted.
    pub fn topological_sort(&self) -> Vec<String> {
        self.build_order().order
    }

    /// Like [`topological_sort`](Self::topological_sort), but also reports
    /// which tools were left out.
    pub fn build_order(&self) -> BuildOrder {
        let mut remaining: Vec<usize> = vec![0; self.graph.node_count()];
        for index in self.graph.node_indices() {
            remaining[index.index()] = self.sorted_neighbors(index, Direction::Outgoing).len();
        }

        let mut queue: VecDeque<NodeIndex> = self
            .sorted_indexes()
            .into_iter()
            .filter(|n| remaining[n.index()] == 0)
            .collect();

        let mut emitted = vec![false; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());

        while let Some(node) = queue.pop_front() {
            emitted[node.index()] = true;
            order.push(self.id_at(node).to_string());

            for dependent in self.sorted_neighbors(node, Direction::Incoming) {
                let count = &mut remaining[dependent.index()];
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        let blocked = self
            .sorted_indexes()
            .into_iter()
            .filter(|n| !emitted[n.index()])
            .map(|n| self.id_at(n).to_string())
            .collect();

        BuildOrder { order, blocked }
    }
}
