//! Chain reliability.
//!
//! A tool is only as available as everything it needs. Compound
//! reliability is the product of the tool's own reliability and that of
//! every distinct transitive dependency, each counted once even when it is
//! reachable along several paths. This treats failures as independent and
//! is a pessimistic lower bound for shared infrastructure.

use crate::error::{Error, Result};
use crate::graph::ToolGraph;
use petgraph::Direction;
use serde::Serialize;

/// Compound reliability below which a chain is flagged.
pub const DEFAULT_RELIABILITY_THRESHOLD: f64 = 0.9;

/// One factor of a compound reliability product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReliability {
    /// Dependency id
    pub id: String,
    /// Its declared reliability
    pub reliability: f64,
    /// Minimum hops from the analyzed tool.
    pub depth: usize,
}

/// Compound reliability of a tool and its dependency chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReliability {
    /// The analyzed tool.
    pub tool_id: String,
    /// The analyzed tool's own reliability.
    pub own_reliability: f64,
    /// Product over the tool and every distinct transitive dependency.
    pub compound: f64,
    /// The tool itself plus its distinct transitive dependencies.
    pub chain_length: usize,
    /// Dependencies in BFS order (depth, then id).
    pub links: Vec<LinkReliability>,
    /// The least reliable dependency, if any. Ties go to the smallest id.
    pub weakest: Option<LinkReliability>,
    /// Threshold the compound value was checked against.
    pub threshold: f64,
    /// True when `compound < threshold`.
    pub below_threshold: bool,
}

impl ToolGraph {
    /// Computes the compound reliability of a tool's dependency chain.
    ///
    /// Returns `Ok(None)` for an unknown id. A tool with no dependencies
    /// has a compound reliability equal to its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] if `threshold` is not in `[0, 1]`.
    pub fn chain_reliability(&self, id: &str, threshold: f64) -> Result<Option<ChainReliability>> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }

        let Some(start) = self.index_of(id) else {
            return Ok(None);
        };
        let own_reliability = self.graph[start].reliability;

        let mut links: Vec<LinkReliability> = self
            .bfs_depths(start, Direction::Outgoing, None)
            .into_iter()
            .map(|(index, depth)| LinkReliability {
                id: self.id_at(index).to_string(),
                reliability: self.graph[index].reliability,
                depth,
            })
            .collect();
        links.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.id.cmp(&b.id)));

        let compound = links
            .iter()
            .fold(own_reliability, |acc, link| acc * link.reliability);

        let weakest = links
            .iter()
            .min_by(|a, b| {
                a.reliability
                    .total_cmp(&b.reliability)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned();

        Ok(Some(ChainReliability {
            tool_id: id.to_string(),
            own_reliability,
            compound,
            chain_length: links.len() + 1,
            links,
            weakest,
            threshold,
            below_threshold: compound < threshold,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyEdge, DependencyType, ToolNode, ToolType};
    use rstest::rstest;

    fn chain(len: usize) -> ToolGraph {
        let ids: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
        ToolGraph::load(
            ids.iter().map(|id| ToolNode::new(id, ToolType::Cli)).collect(),
            ids.windows(2)
                .map(|w| DependencyEdge::new(&w[0], &w[1], DependencyType::Cli))
                .collect(),
        )
    }

    #[test]
    fn test_linear_chain_compounds() {
        let graph = chain(5);

        let chain = graph
            .chain_reliability("t0", DEFAULT_RELIABILITY_THRESHOLD)
            .unwrap()
            .unwrap();
        assert_eq!(chain.chain_length, 5);
        assert!((chain.compound - 0.95_f64.powi(5)).abs() < 1e-9);
        assert!((chain.compound - 0.7738).abs() < 1e-4);
        assert!(chain.below_threshold);
    }

    #[test]
    fn test_diamond_counts_shared_dependency_once() {
        let graph = ToolGraph::load(
            vec![
                ToolNode::new("a", ToolType::Cli).with_reliability(0.9),
                ToolNode::new("b", ToolType::Cli).with_reliability(0.85),
                ToolNode::new("c", ToolType::Cli).with_reliability(0.8),
                ToolNode::new("d", ToolType::Cli).with_reliability(0.95),
            ],
            vec![
                DependencyEdge::new("a", "b", DependencyType::Cli),
                DependencyEdge::new("a", "c", DependencyType::Cli),
                DependencyEdge::new("b", "d", DependencyType::Cli),
                DependencyEdge::new("c", "d", DependencyType::Cli),
            ],
        );

        let chain = graph.chain_reliability("a", 0.5).unwrap().unwrap();
        assert_eq!(chain.chain_length, 4);
        assert!((chain.compound - 0.9 * 0.85 * 0.8 * 0.95).abs() < 1e-9);
        assert!((chain.compound - 0.5814).abs() < 1e-4);
        assert!(!chain.below_threshold);

        let weakest = chain.weakest.unwrap();
        assert_eq!(weakest.id, "c");
        let ids: Vec<&str> = chain.links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "d"]);
    }

    #[test]
    fn test_leaf_uses_own_reliability() {
        let graph = chain(1);

        let chain = graph.chain_reliability("t0", 0.9).unwrap().unwrap();
        assert!((chain.compound - 0.95).abs() < 1e-9);
        assert_eq!(chain.chain_length, 1);
        assert!(chain.weakest.is_none());
        assert!(!chain.below_threshold);
    }

    #[test]
    fn test_cycle_counts_start_once() {
        let graph = ToolGraph::load(
            vec![
                ToolNode::new("a", ToolType::Cli).with_reliability(0.5),
                ToolNode::new("b", ToolType::Cli).with_reliability(0.5),
            ],
            vec![
                DependencyEdge::new("a", "b", DependencyType::Cli),
                DependencyEdge::new("b", "a", DependencyType::Cli),
            ],
        );

        let chain = graph.chain_reliability("a", 0.9).unwrap().unwrap();
        assert!((chain.compound - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_weakest_tie_goes_to_smallest_id() {
        let graph = ToolGraph::load(
            vec![
                ToolNode::new("root", ToolType::Cli),
                ToolNode::new("zed", ToolType::Cli).with_reliability(0.7),
                ToolNode::new("amp", ToolType::Cli).with_reliability(0.7),
            ],
            vec![
                DependencyEdge::new("root", "zed", DependencyType::Cli),
                DependencyEdge::new("root", "amp", DependencyType::Cli),
            ],
        );

        let chain = graph.chain_reliability("root", 0.9).unwrap().unwrap();
        assert_eq!(chain.weakest.unwrap().id, "amp");
    }

    #[test]
    fn test_unknown_tool() {
        let graph = chain(2);
        assert!(graph.chain_reliability("ghost", 0.9).unwrap().is_none());
    }

    #[rstest]
    #[case::negative(-0.1)]
    #[case::above_one(1.5)]
    #[case::nan(f64::NAN)]
    fn test_invalid_threshold(#[case] threshold: f64) {
        let graph = chain(2);
        assert!(matches!(
            graph.chain_reliability("t0", threshold),
            Err(Error::InvalidThreshold(_))
        ));
    }
}
