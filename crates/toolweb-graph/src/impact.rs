//! Impact analysis for tool changes.
//!
//! This module answers "what breaks if I change this?". It runs one
//! transitive-dependents BFS from the target and derives everything else
//! (counts, per-type summary, risk score, rollback hints) from a single
//! pass over that result.
//!
//! # Risk Model
//!
//! ```text
//! chain_reliability = start.reliability * avg_reliability ^ min(max_depth, 3)
//! score = affected * (1 + avg_debt / 10) * (1 / max(chain_reliability, 0.1))
//!       + critical_count * 5
//! ```
//!
//! The exponent is capped at three hops so deep graphs do not drive the
//! reliability term to zero and the score to infinity.

use crate::domain::{ToolNode, ToolType};
use crate::graph::ToolGraph;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Hops beyond which depth no longer lowers the chain reliability estimate.
const MAX_RELIABILITY_HOPS: usize = 3;

/// Floor applied to chain reliability before inverting it.
const MIN_CHAIN_RELIABILITY: f64 = 0.1;

/// Score added per affected tool of the critical type.
const CRITICAL_WEIGHT: f64 = 5.0;

/// Severity bucket for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Score up to 20.
    Low,
    /// Score up to 50.
    Medium,
    /// Score up to 100.
    High,
    /// Score above 100.
    Critical,
}

impl RiskLevel {
    /// Buckets a score. This is the only way to derive a level.
    pub fn from_score(score: f64) -> Self {
        if score <= 20.0 {
            RiskLevel::Low
        } else if score <= 50.0 {
            RiskLevel::Medium
        } else if score <= 100.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// Returns the uppercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunables for [`ToolGraph::analyze_impact`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactOptions {
    /// Tool type whose dependents are verified first and weigh extra.
    pub critical_type: ToolType,
    /// Debt score at or above which a dependent is flagged for review.
    pub high_debt_threshold: u32,
    /// Chain reliability below which the report warns.
    pub low_reliability_threshold: f64,
}

impl Default for ImpactOptions {
    fn default() -> Self {
        Self {
            critical_type: ToolType::Mcp,
            high_debt_threshold: 7,
            low_reliability_threshold: 0.8,
        }
    }
}

/// A tool affected by a change to the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedTool {
    /// Tool id
    pub id: String,
    /// Display name
    pub name: String,
    /// Tool type
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    /// Declared reliability
    pub reliability: f64,
    /// Technical debt score
    pub debt_score: u32,
    /// Hops from the target along dependent edges.
    pub depth: usize,
}

impl AffectedTool {
    fn new(node: &ToolNode, depth: usize) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            tool_type: node.tool_type,
            reliability: node.reliability,
            debt_score: node.debt_score,
            depth,
        }
    }
}

/// Affected-tool count for one tool type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeImpact {
    /// Tool type
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    /// Affected tools of this type
    pub count: usize,
    /// True for the configured critical type.
    pub critical: bool,
}

/// Inputs and outcome of the risk model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Unbounded risk score; higher is riskier.
    pub score: f64,
    /// Bucketed score.
    pub level: RiskLevel,
    /// Target reliability times average reliability per hop, capped at
    /// three hops.
    pub chain_reliability: f64,
    /// Mean reliability of affected tools (1.0 when none).
    pub avg_reliability: f64,
    /// Mean debt score of affected tools.
    pub avg_debt_score: f64,
    /// Affected tools of the critical type.
    pub critical_count: usize,
}

/// Complete blast-radius report for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// The tool being changed.
    pub target: ToolNode,
    /// Affected tools sorted by depth, then name.
    pub affected: Vec<AffectedTool>,
    /// Affected tools at depth 1.
    pub direct_count: usize,
    /// Affected tools beyond depth 1.
    pub transitive_count: usize,
    /// All affected tools.
    pub total_count: usize,
    /// Deepest affected tool, 0 when nothing is affected.
    pub max_depth: usize,
    /// Counts per type, largest first.
    pub by_type: Vec<TypeImpact>,
    /// Risk model outcome.
    pub risk: RiskAssessment,
    /// Verification steps, most urgent first.
    pub rollback_order: Vec<String>,
}

impl ImpactReport {
    /// Returns the affected tools at exactly one hop.
    pub fn direct(&self) -> impl Iterator<Item = &AffectedTool> {
        self.affected.iter().filter(|a| a.depth == 1)
    }

    /// Returns a one-line summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Blast radius: {} tools (direct: {}, transitive: {}), risk {} ({:.1})",
            self.total_count,
            self.direct_count,
            self.transitive_count,
            self.risk.level,
            self.risk.score
        )
    }
}

impl ToolGraph {
    /// Analyzes the impact of changing a tool.
    ///
    /// Returns `None` for an unknown id.
    pub fn analyze_impact(&self, id: &str, options: &ImpactOptions) -> Option<ImpactReport> {
        let target = self.get_node(id)?;
        let affected: Vec<AffectedTool> = self
            .transitive_dependents(id)
            .into_iter()
            .map(|r| AffectedTool::new(r.node, r.depth))
            .collect();

        let mut direct_count = 0;
        let mut max_depth = 0;
        let mut reliability_sum = 0.0;
        let mut debt_sum = 0.0;
        let mut by_type: BTreeMap<ToolType, usize> = BTreeMap::new();

        for tool in &affected {
            if tool.depth == 1 {
                direct_count += 1;
            }
            max_depth = max_depth.max(tool.depth);
            reliability_sum += tool.reliability;
            debt_sum += f64::from(tool.debt_score);
            *by_type.entry(tool.tool_type).or_default() += 1;
        }

        let total_count = affected.len();
        let critical_count = by_type.get(&options.critical_type).copied().unwrap_or(0);
        let risk = assess_risk(
            target.reliability,
            total_count,
            reliability_sum,
            debt_sum,
            max_depth,
            critical_count,
        );

        let mut by_type: Vec<TypeImpact> = by_type
            .into_iter()
            .map(|(tool_type, count)| TypeImpact {
                tool_type,
                count,
                critical: tool_type == options.critical_type,
            })
            .collect();
        by_type.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.tool_type.as_str().cmp(b.tool_type.as_str()))
        });

        let rollback_order = rollback_hints(&affected, &risk, max_depth, options);

        Some(ImpactReport {
            target: target.clone(),
            direct_count,
            transitive_count: total_count - direct_count,
            total_count,
            max_depth,
            by_type,
            risk,
            rollback_order,
            affected,
        })
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn assess_risk(
    start_reliability: f64,
    affected: usize,
    reliability_sum: f64,
    debt_sum: f64,
    max_depth: usize,
    critical_count: usize,
) -> RiskAssessment {
    let (avg_reliability, avg_debt_score) = if affected == 0 {
        (1.0, 0.0)
    } else {
        (reliability_sum / affected as f64, debt_sum / affected as f64)
    };

    let hops = max_depth.min(MAX_RELIABILITY_HOPS) as i32;
    let chain_reliability = start_reliability * avg_reliability.powi(hops);

    let score = affected as f64
        * (1.0 + avg_debt_score / 10.0)
        * (1.0 / chain_reliability.max(MIN_CHAIN_RELIABILITY))
        + critical_count as f64 * CRITICAL_WEIGHT;

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        chain_reliability,
        avg_reliability,
        avg_debt_score,
        critical_count,
    }
}

fn join_ids<'a>(tools: impl Iterator<Item = &'a AffectedTool>) -> String {
    tools.map(|t| t.id.as_str()).collect::<Vec<_>>().join(", ")
}

/// Builds the ordered list of verification steps.
fn rollback_hints(
    affected: &[AffectedTool],
    risk: &RiskAssessment,
    max_depth: usize,
    options: &ImpactOptions,
) -> Vec<String> {
    let mut hints = Vec::new();

    if risk.critical_count > 0 {
        hints.push(format!(
            "Verify {} {} dependent(s) first: {}",
            risk.critical_count,
            options.critical_type,
            join_ids(
                affected
                    .iter()
                    .filter(|t| t.tool_type == options.critical_type)
            )
        ));
    }

    let direct: Vec<&AffectedTool> = affected.iter().filter(|t| t.depth == 1).collect();
    if !direct.is_empty() {
        hints.push(format!(
            "Verify {} direct dependent(s): {}",
            direct.len(),
            join_ids(direct.into_iter())
        ));
    }

    let high_debt: Vec<&AffectedTool> = affected
        .iter()
        .filter(|t| t.debt_score >= options.high_debt_threshold)
        .collect();
    if !high_debt.is_empty() {
        hints.push(format!(
            "Review high-debt dependent(s) for fragile integrations: {}",
            join_ids(high_debt.into_iter())
        ));
    }

    if risk.level >= RiskLevel::High {
        hints.push(format!(
            "Risk is {}: roll out in stages and keep the previous version deployable",
            risk.level
        ));
    }

    if risk.chain_reliability < options.low_reliability_threshold {
        hints.push(format!(
            "Chain reliability is low ({:.2}): add fallbacks or health checks before rollout",
            risk.chain_reliability
        ));
    }

    if max_depth > 1 {
        hints.push(format!(
            "Test innermost dependents first, from depth 1 out to depth {max_depth}"
        ));
    }

    hints
}
