//! Path finding along "depends on" edges.

use crate::error::{Error, Result};
use crate::graph::ToolGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, VecDeque};

/// Default cap on the number of paths returned by
/// [`ToolGraph::find_all_paths`].
pub const DEFAULT_PATH_LIMIT: usize = 10;

impl ToolGraph {
    /// Finds the shortest dependency path from `from` to `to`.
    ///
    /// The path includes both endpoints. A tool's path to itself is just
    /// `[from]`. Returns `None` when either tool is unknown or `to` is not
    /// reachable.
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;

        if start == goal {
            return Some(vec![from.to_string()]);
        }

        let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.sorted_neighbors(current, Direction::Outgoing) {
                if neighbor == start || parents.contains_key(&neighbor) {
                    continue;
                }
                parents.insert(neighbor, current);

                if neighbor == goal {
                    return Some(self.unwind(&parents, start, goal));
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Enumerates simple dependency paths from `from` to `to`, stopping
    /// after `limit` paths.
    ///
    /// No tool repeats within a path, which also keeps the search finite on
    /// cyclic graphs. Paths are ordered lexicographically by tool id, so a
    /// limited result is a prefix of the unlimited one. Unknown endpoints
    /// yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `limit` is zero.
    pub fn find_all_paths(&self, from: &str, to: &str, limit: usize) -> Result<Vec<Vec<String>>> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }

        let (Some(start), Some(goal)) = (self.index_of(from), self.index_of(to)) else {
            return Ok(Vec::new());
        };

        if start == goal {
            return Ok(vec![vec![from.to_string()]]);
        }

        Ok(self.simple_paths(start, goal, limit))
    }

    /// Depth-first enumeration over id-sorted neighbours. Paths come out in
    /// lexicographic id order; the goal is never passed through.
    fn simple_paths(&self, start: NodeIndex, goal: NodeIndex, limit: usize) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        let mut on_path = vec![false; self.graph.node_count()];
        let mut path = vec![start];
        let mut stack = vec![self.sorted_neighbors(start, Direction::Outgoing).into_iter()];
        on_path[start.index()] = true;

        while let Some(children) = stack.last_mut() {
            let Some(next) = children.next() else {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path[done.index()] = false;
                }
                continue;
            };

            if on_path[next.index()] {
                continue;
            }

            if next == goal {
                paths.push(
                    path.iter()
                        .chain(std::iter::once(&goal))
                        .map(|&index| self.id_at(index).to_string())
                        .collect(),
                );
                if paths.len() == limit {
                    break;
                }
                continue;
            }

            on_path[next.index()] = true;
            path.push(next);
            stack.push(self.sorted_neighbors(next, Direction::Outgoing).into_iter());
        }

        paths
    }

    fn unwind(
        &self,
        parents: &HashMap<NodeIndex, NodeIndex>,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Vec<String> {
        let mut path = vec![self.id_at(goal).to_string()];
        let mut current = goal;
        while current != start {
            current = parents[&current];
            path.push(self.id_at(current).to_string());
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyEdge, DependencyType, ToolNode, ToolType};

    fn graph(ids: &[&str], edges: &[(&str, &str)]) -> ToolGraph {
        ToolGraph::load(
            ids.iter().map(|id| ToolNode::new(*id, ToolType::Cli)).collect(),
            edges
                .iter()
                .map(|(a, b)| DependencyEdge::new(*a, *b, DependencyType::Cli))
                .collect(),
        )
    }

    fn diamond() -> ToolGraph {
        graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        )
    }

    #[test]
    fn test_path_to_self() {
        let g = diamond();
        assert_eq!(g.find_path("b", "b").unwrap(), ["b"]);
    }

    #[test]
    fn test_shortest_path() {
        // a -> b -> c -> d, plus a -> x -> d
        let g = graph(
            &["a", "b", "c", "d", "x"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "x"), ("x", "d")],
        );
        assert_eq!(g.find_path("a", "d").unwrap(), ["a", "x", "d"]);
    }

    #[test]
    fn test_path_follows_edge_direction() {
        let g = diamond();
        assert!(g.find_path("d", "a").is_none());
    }

    #[test]
    fn test_path_not_found() {
        let g = graph(&["a", "b"], &[]);
        assert!(g.find_path("a", "b").is_none());
        assert!(g.find_path("a", "ghost").is_none());
        assert!(g.find_path("ghost", "ghost").is_none());
    }

    #[test]
    fn test_path_through_cycle_terminates() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "a")]);
        assert!(g.find_path("a", "c").is_none());
        assert_eq!(g.find_path("b", "a").unwrap(), ["b", "a"]);
    }

    #[test]
    fn test_all_paths_diamond() {
        let g = diamond();

        let paths = g.find_all_paths("a", "d", DEFAULT_PATH_LIMIT).unwrap();
        assert_eq!(paths, [vec!["a", "b", "d"], vec!["a", "c", "d"]]);
    }

    #[test]
    fn test_all_paths_respects_limit() {
        let g = diamond();
        assert_eq!(g.find_all_paths("a", "d", 1).unwrap(), [vec!["a", "b", "d"]]);
    }

    #[test]
    fn test_all_paths_ordered_by_id_regardless_of_insertion() {
        // Same diamond plus a -> z -> d, edges listed in reverse id order.
        let g = graph(
            &["z", "d", "c", "b", "a"],
            &[("z", "d"), ("c", "d"), ("b", "d"), ("a", "z"), ("a", "c"), ("a", "b")],
        );

        assert_eq!(
            g.find_all_paths("a", "d", DEFAULT_PATH_LIMIT).unwrap(),
            [vec!["a", "b", "d"], vec!["a", "c", "d"], vec!["a", "z", "d"]]
        );
        assert_eq!(
            g.find_all_paths("a", "d", 2).unwrap(),
            [vec!["a", "b", "d"], vec!["a", "c", "d"]]
        );
    }

    #[test]
    fn test_all_paths_zero_limit_is_error() {
        let g = diamond();
        assert!(matches!(
            g.find_all_paths("a", "d", 0),
            Err(Error::InvalidLimit(0))
        ));
    }

    #[test]
    fn test_all_paths_no_path() {
        let g = graph(&["a", "b"], &[]);
        assert!(g.find_all_paths("a", "b", 5).unwrap().is_empty());
        assert!(g.find_all_paths("a", "ghost", 5).unwrap().is_empty());
    }

    #[test]
    fn test_all_paths_with_cycle() {
        // a -> b -> c, b -> a, a -> c
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("b", "a"), ("a", "c")]);

        assert_eq!(
            g.find_all_paths("a", "c", 10).unwrap(),
            [vec!["a", "b", "c"], vec!["a", "c"]]
        );
    }
}
