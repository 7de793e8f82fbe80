//! Cycle detection.
//!
//! An iterative depth-first search tags every node with one of three
//! states. Reaching a node that is still on the DFS stack closes a cycle;
//! the cycle is the stack slice from that node to the top. A self-loop is
//! the one-element case.
//!
//! Recursion is replaced by an explicit stack of frames, so deep chains
//! cannot overflow the call stack.

use crate::graph::ToolGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Tool ids forming a cycle, in dependency order starting from the node
/// where the cycle was entered.
pub type Cycle = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// One DFS stack entry: a node and its not-yet-explored dependencies.
struct Frame {
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    next: usize,
}

impl ToolGraph {
    /// Detects cycles in the dependency graph.
    ///
    /// Each cycle is reported once, and a tool appears in at most one
    /// reported cycle (the first one discovered). Traversal visits tools in
    /// id order, so the result is deterministic.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut cycles = Vec::new();
        self.walk_cycles(|cycle| {
            cycles.push(cycle);
            true
        });
        cycles
    }

    /// Returns true if the graph contains at least one cycle.
    ///
    /// Stops at the first cycle found.
    pub fn has_cycle(&self) -> bool {
        let mut found = false;
        self.walk_cycles(|_| {
            found = true;
            false
        });
        found
    }

    /// Gets the reported cycles that pass through the given tool.
    pub fn cycles_involving(&self, id: &str) -> Vec<Cycle> {
        self.find_cycles()
            .into_iter()
            .filter(|cycle| cycle.iter().any(|member| member == id))
            .collect()
    }

    /// Runs the DFS, handing each new cycle to `on_cycle`. The walk stops
    /// as soon as `on_cycle` returns false.
    fn walk_cycles<F>(&self, mut on_cycle: F)
    where
        F: FnMut(Cycle) -> bool,
    {
        let mut state = vec![VisitState::Unvisited; self.graph.node_count()];
        let mut reported: HashSet<NodeIndex> = HashSet::new();

        for root in self.sorted_indexes() {
            if state[root.index()] != VisitState::Unvisited {
                continue;
            }

            state[root.index()] = VisitState::OnStack;
            let mut stack = vec![self.frame(root)];

            while let Some(frame) = stack.last_mut() {
                let Some(&neighbor) = frame.neighbors.get(frame.next) else {
                    state[frame.node.index()] = VisitState::Done;
                    stack.pop();
                    continue;
                };
                frame.next += 1;

                match state[neighbor.index()] {
                    VisitState::Unvisited => {
                        state[neighbor.index()] = VisitState::OnStack;
                        stack.push(self.frame(neighbor));
                    }
                    VisitState::OnStack => {
                        let Some(start) = stack.iter().position(|f| f.node == neighbor) else {
                            continue;
                        };
                        let members: Vec<NodeIndex> =
                            stack[start..].iter().map(|f| f.node).collect();
                        if members.iter().any(|m| reported.contains(m)) {
                            continue;
                        }
                        reported.extend(members.iter().copied());

                        let cycle = members
                            .into_iter()
                            .map(|m| self.id_at(m).to_string())
                            .collect();
                        if !on_cycle(cycle) {
                            return;
                        }
                    }
                    VisitState::Done => {}
                }
            }
        }
    }

    fn frame(&self, node: NodeIndex) -> Frame {
        Frame {
            node,
            neighbors: self.sorted_neighbors(node, Direction::Outgoing),
            next: 0,
        }
    }
}
