//! Property tests over randomly generated graphs.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use toolweb_graph::{DependencyEdge, DependencyType, ToolGraph, ToolNode, ToolType};

const MAX_NODES: usize = 12;

fn id(i: usize) -> String {
    format!("n{i:02}")
}

/// Node count plus an arbitrary edge list over those nodes. Self-loops,
/// cycles and duplicates are all allowed.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=MAX_NODES).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..(n * 3));
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> ToolGraph {
    ToolGraph::load(
        (0..n).map(|i| ToolNode::new(id(i), ToolType::Cli)).collect(),
        edges
            .iter()
            .map(|&(a, b)| DependencyEdge::new(id(a), id(b), DependencyType::Cli))
            .collect(),
    )
}

/// Reference shortest hop counts computed over a plain adjacency list.
fn reference_depths(n: usize, edges: &[(usize, usize)], start: usize) -> HashMap<String, usize> {
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for &(a, b) in edges {
        adjacency[a].insert(b);
    }

    let mut depth: Vec<Option<usize>> = vec![None; n];
    depth[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let next = depth[current].unwrap_or_default() + 1;
        for &neighbor in &adjacency[current] {
            if depth[neighbor].is_none() {
                depth[neighbor] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    depth
        .into_iter()
        .enumerate()
        .filter(|&(i, d)| i != start && d.is_some())
        .map(|(i, d)| (id(i), d.unwrap_or_default()))
        .collect()
}

proptest! {
    #[test]
    fn transitive_dependencies_are_unique_and_minimal((n, edges) in arb_graph(), start in 0..MAX_NODES) {
        let start = start % n;
        let graph = build(n, &edges);

        let reached = graph.transitive_dependencies(&id(start));
        let got: HashMap<String, usize> = reached
            .iter()
            .map(|r| (r.node.id.clone(), r.depth))
            .collect();

        prop_assert_eq!(got.len(), reached.len(), "a tool was reported twice");
        prop_assert!(!got.contains_key(&id(start)));
        prop_assert_eq!(got, reference_depths(n, &edges, start));
    }

    #[test]
    fn results_are_sorted_by_depth((n, edges) in arb_graph(), start in 0..MAX_NODES) {
        let graph = build(n, &edges);
        let reached = graph.transitive_dependents(&id(start % n));
        prop_assert!(reached.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test]
    fn has_cycle_agrees_with_find_cycles((n, edges) in arb_graph()) {
        let graph = build(n, &edges);
        prop_assert_eq!(graph.has_cycle(), !graph.find_cycles().is_empty());
    }

    #[test]
    fn reported_cycles_are_disjoint((n, edges) in arb_graph()) {
        let graph = build(n, &edges);
        let mut seen = HashSet::new();
        for cycle in graph.find_cycles() {
            for member in cycle {
                prop_assert!(seen.insert(member));
            }
        }
    }

    #[test]
    fn build_order_respects_every_edge((n, edges) in arb_graph()) {
        let graph = build(n, &edges);
        let build = graph.build_order();

        prop_assert_eq!(build.order.len() + build.blocked.len(), n);
        prop_assert_eq!(build.is_complete(), !graph.has_cycle());

        let position: HashMap<&str, usize> = build
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        for &(a, b) in &edges {
            if let (Some(pa), Some(pb)) = (position.get(id(a).as_str()), position.get(id(b).as_str())) {
                prop_assert!(pb < pa, "{} must come before {}", id(b), id(a));
            }
        }
    }

    #[test]
    fn found_path_is_shortest((n, edges) in arb_graph(), from in 0..MAX_NODES, to in 0..MAX_NODES) {
        let (from, to) = (from % n, to % n);
        let graph = build(n, &edges);
        let depths = reference_depths(n, &edges, from);

        match graph.find_path(&id(from), &id(to)) {
            Some(path) if from == to => prop_assert_eq!(path.len(), 1),
            Some(path) => prop_assert_eq!(Some(&(path.len() - 1)), depths.get(&id(to))),
            None => prop_assert!(from != to && !depths.contains_key(&id(to))),
        }
    }
}
