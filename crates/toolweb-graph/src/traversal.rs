//! Transitive dependency and dependent queries.
//!
//! Both directions use the same breadth-first walk. Because edges are
//! unweighted, the first visit to a node is at its minimum hop count, so a
//! node reachable along several paths (a diamond) is reported once, at the
//! shorter depth. The start node is marked visited before the walk begins,
//! which keeps it out of its own result even when a cycle leads back to it.

use crate::domain::ToolNode;
use crate::graph::{ToolGraph, by_name};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// A tool reached by a transitive query, with its minimum hop count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reached<'g> {
    /// The reached tool
    pub node: &'g ToolNode,
    /// Fewest hops from the start tool (always at least 1)
    pub depth: usize,
}

impl ToolGraph {
    /// Gets every tool this tool depends on, directly or transitively.
    ///
    /// Sorted by depth, then name (ignoring case). Unknown ids yield an
    /// empty list.
    pub fn transitive_dependencies(&self, id: &str) -> Vec<Reached<'_>> {
        self.reach(id, Direction::Outgoing, None)
    }

    /// Gets every tool that depends on this tool, directly or transitively.
    ///
    /// Sorted by depth, then name (ignoring case). Unknown ids yield an
    /// empty list.
    pub fn transitive_dependents(&self, id: &str) -> Vec<Reached<'_>> {
        self.reach(id, Direction::Incoming, None)
    }

    /// Like [`transitive_dependencies`](Self::transitive_dependencies), but
    /// stops `max_depth` hops out.
    pub fn transitive_dependencies_within(&self, id: &str, max_depth: usize) -> Vec<Reached<'_>> {
        self.reach(id, Direction::Outgoing, Some(max_depth))
    }

    /// Like [`transitive_dependents`](Self::transitive_dependents), but
    /// stops `max_depth` hops out.
    pub fn transitive_dependents_within(&self, id: &str, max_depth: usize) -> Vec<Reached<'_>> {
        self.reach(id, Direction::Incoming, Some(max_depth))
    }

    fn reach(&self, id: &str, direction: Direction, max_depth: Option<usize>) -> Vec<Reached<'_>> {
        let Some(start) = self.index_of(id) else {
            return Vec::new();
        };

        let mut result: Vec<Reached<'_>> = self
            .bfs_depths(start, direction, max_depth)
            .into_iter()
            .map(|(index, depth)| Reached {
                node: &self.graph[index],
                depth,
            })
            .collect();

        result.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| by_name(a.node, b.node)));
        result
    }

    /// BFS from `start`, returning the minimum depth of every other node
    /// reached. `start` itself is never included.
    pub(crate) fn bfs_depths(
        &self,
        start: NodeIndex,
        direction: Direction,
        max_depth: Option<usize>,
    ) -> HashMap<NodeIndex, usize> {
        let mut depths: HashMap<NodeIndex, usize> = HashMap::new();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            for neighbor in self.graph.neighbors_directed(current, direction) {
                if neighbor == start || depths.contains_key(&neighbor) {
                    continue;
                }
                depths.insert(neighbor, depth + 1);
                queue.push_back((neighbor, depth + 1));
            }
        }

        depths
    }
}
