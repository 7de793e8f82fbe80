//! Output formatting for CLI commands.
//!
//! Every command renders either human-readable text or pretty-printed JSON.
//! Text renderers write to any `W: Write` so they can be tested against a
//! buffer; [`to_stdout`] hands them a locked stdout.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, arrows)

pub mod color;

use color::{
    arrow, bold, bullet, colorize_id, colorize_reliability, colorize_risk, colorize_type, dimmed,
};
use serde::Serialize;
use std::env;
use std::io::{self, StdoutLock, Write};
use toolweb_graph::{
    BuildOrder, ChainReliability, Cycle, GraphStats, ImpactReport, Reached, ToolNode,
};

pub use color::{error, success, warning};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only symbols instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `TOOLWEB_ASCII`: Set to "1" or "true" for ASCII-only symbols (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TOOLWEB_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_ascii = match get("TOOLWEB_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "TOOLWEB_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // Respect NO_COLOR (https://no-color.org/), TOOLWEB_COLOR for explicit control
        let use_colors = get("NO_COLOR").is_none()
            && get("TOOLWEB_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Dispatch Helpers
// ============================================================================

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Run a text renderer against locked stdout with config from the
/// environment.
pub fn to_stdout<F>(render: F) -> io::Result<()>
where
    F: FnOnce(&mut StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
{
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();
    render(&mut handle, &config)
}

// ============================================================================
// Tool Lists
// ============================================================================

/// Write direct neighbours of a tool.
pub fn write_tools<W: Write>(
    w: &mut W,
    heading: &str,
    tools: &[&ToolNode],
    config: &OutputConfig,
) -> io::Result<()> {
    if tools.is_empty() {
        writeln!(w, "{heading}: none")?;
        return Ok(());
    }

    writeln!(w, "{} ({}):", bold(heading, config), tools.len())?;
    for tool in tools {
        writeln!(
            w,
            "  {} {} ({})",
            bullet(config),
            colorize_id(&tool.id, config),
            colorize_type(tool.tool_type, config)
        )?;
    }
    Ok(())
}

/// Write the result of a transitive query.
pub fn write_reached<W: Write>(
    w: &mut W,
    heading: &str,
    reached: &[Reached<'_>],
    config: &OutputConfig,
) -> io::Result<()> {
    if reached.is_empty() {
        writeln!(w, "{heading}: none")?;
        return Ok(());
    }

    writeln!(w, "{} ({}):", bold(heading, config), reached.len())?;
    for r in reached {
        writeln!(
            w,
            "  {} {} ({}) {}",
            bullet(config),
            colorize_id(&r.node.id, config),
            colorize_type(r.node.tool_type, config),
            dimmed(&format!("depth {}", r.depth), config)
        )?;
    }
    Ok(())
}

// ============================================================================
// Paths and Cycles
// ============================================================================

fn join_path(path: &[String], config: &OutputConfig) -> String {
    path.iter()
        .map(|id| colorize_id(id, config))
        .collect::<Vec<_>>()
        .join(&format!(" {} ", arrow(config)))
}

/// Write a single shortest path.
pub fn write_path<W: Write>(
    w: &mut W,
    from: &str,
    to: &str,
    path: Option<&[String]>,
    config: &OutputConfig,
) -> io::Result<()> {
    match path {
        Some(path) => {
            let hops = path.len().saturating_sub(1);
            writeln!(
                w,
                "{} {}",
                join_path(path, config),
                dimmed(&format!("({hops} hop(s))"), config)
            )
        }
        None => writeln!(w, "No dependency path from {from} to {to}."),
    }
}

/// Write an enumeration of simple paths.
pub fn write_paths<W: Write>(
    w: &mut W,
    from: &str,
    to: &str,
    paths: &[Vec<String>],
    limit: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if paths.is_empty() {
        return writeln!(w, "No dependency path from {from} to {to}.");
    }

    writeln!(w, "Found {} path(s) from {from} to {to}:", paths.len())?;
    for (i, path) in paths.iter().enumerate() {
        writeln!(w, "  {}. {}", i + 1, join_path(path, config))?;
    }
    if paths.len() == limit {
        writeln!(
            w,
            "{}",
            dimmed(
                &format!("(stopped at {limit}; pass --limit to see more)"),
                config
            )
        )?;
    }
    Ok(())
}

/// Write detected cycles, each closed back onto its first member.
pub fn write_cycles<W: Write>(w: &mut W, cycles: &[Cycle], config: &OutputConfig) -> io::Result<()> {
    if cycles.is_empty() {
        return writeln!(w, "{}", success("No cycles found.", config));
    }

    writeln!(
        w,
        "{}",
        error(&format!("Found {} cycle(s):", cycles.len()), config)
    )?;
    for (i, cycle) in cycles.iter().enumerate() {
        let mut closed = cycle.clone();
        if let Some(first) = cycle.first() {
            closed.push(first.clone());
        }
        writeln!(w, "  {}. {}", i + 1, join_path(&closed, config))?;
    }
    Ok(())
}

/// Write a build order and the tools it had to leave out.
pub fn write_build_order<W: Write>(
    w: &mut W,
    build: &BuildOrder,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} ({} tools):",
        bold("Build order", config),
        build.order.len()
    )?;
    for (i, id) in build.order.iter().enumerate() {
        writeln!(w, "  {}. {}", i + 1, colorize_id(id, config))?;
    }

    if !build.is_complete() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}): {}",
            warning("Blocked by cycles", config),
            build.blocked.len(),
            build.blocked.join(", ")
        )?;
    }
    Ok(())
}

// ============================================================================
// Impact and Reliability
// ============================================================================

/// Write a blast-radius report.
pub fn write_impact<W: Write>(
    w: &mut W,
    report: &ImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let risk = &report.risk;

    writeln!(
        w,
        "{} {} ({})",
        bold("Blast radius for", config),
        colorize_id(&report.target.id, config),
        colorize_type(report.target.tool_type, config)
    )?;
    writeln!(w, "  {} {}", dimmed("Direct:    ", config), report.direct_count)?;
    writeln!(w, "  {} {}", dimmed("Transitive:", config), report.transitive_count)?;
    writeln!(w, "  {} {}", dimmed("Total:     ", config), report.total_count)?;
    writeln!(w, "  {} {}", dimmed("Max depth: ", config), report.max_depth)?;

    writeln!(w)?;
    writeln!(
        w,
        "{} {} (score {:.1})",
        bold("Risk:", config),
        colorize_risk(risk.level, config),
        risk.score
    )?;
    writeln!(
        w,
        "  {} {:.2}%",
        dimmed("Chain reliability:", config),
        risk.chain_reliability * 100.0
    )?;
    writeln!(
        w,
        "  {} {:.2}%",
        dimmed("Avg reliability:  ", config),
        risk.avg_reliability * 100.0
    )?;
    writeln!(
        w,
        "  {} {:.1}",
        dimmed("Avg debt score:   ", config),
        risk.avg_debt_score
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Critical:         ", config),
        risk.critical_count
    )?;

    if !report.by_type.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("By type:", config))?;
        for t in &report.by_type {
            let marker = if t.critical { " (critical)" } else { "" };
            writeln!(
                w,
                "  {:<10} {}{}",
                colorize_type(t.tool_type, config),
                t.count,
                warning(marker, config)
            )?;
        }
    }

    if !report.affected.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Affected tools:", config))?;
        for tool in &report.affected {
            writeln!(
                w,
                "  {} {} ({}) {}",
                bullet(config),
                colorize_id(&tool.id, config),
                colorize_type(tool.tool_type, config),
                dimmed(&format!("depth {}", tool.depth), config)
            )?;
        }
    }

    if !report.rollback_order.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Rollback order:", config))?;
        for (i, hint) in report.rollback_order.iter().enumerate() {
            writeln!(w, "  {}. {hint}", i + 1)?;
        }
    }

    Ok(())
}

/// Write a compound reliability breakdown.
pub fn write_chain_reliability<W: Write>(
    w: &mut W,
    chain: &ChainReliability,
    config: &OutputConfig,
) -> io::Result<()> {
    let verdict = if chain.below_threshold {
        error("BELOW THRESHOLD", config)
    } else {
        success("OK", config)
    };

    writeln!(
        w,
        "{} {}: {} (threshold {:.2}%) {verdict}",
        bold("Chain reliability for", config),
        colorize_id(&chain.tool_id, config),
        colorize_reliability(chain.compound, chain.threshold, config),
        chain.threshold * 100.0
    )?;
    writeln!(
        w,
        "  {} {:.2}%",
        dimmed("Own reliability:", config),
        chain.own_reliability * 100.0
    )?;
    writeln!(w, "  {} {}", dimmed("Chain length:   ", config), chain.chain_length)?;

    if let Some(weakest) = &chain.weakest {
        writeln!(
            w,
            "  {} {} ({:.2}%)",
            dimmed("Weakest link:   ", config),
            colorize_id(&weakest.id, config),
            weakest.reliability * 100.0
        )?;
    }

    if !chain.links.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Contributions:", config))?;
        for link in &chain.links {
            writeln!(
                w,
                "  {} {} {} {}",
                bullet(config),
                colorize_id(&link.id, config),
                colorize_reliability(link.reliability, chain.threshold, config),
                dimmed(&format!("depth {}", link.depth), config)
            )?;
        }
    }

    Ok(())
}

// ============================================================================
// Graph Summary
// ============================================================================

/// Write graph statistics followed by any load warnings.
pub fn write_stats<W: Write>(
    w: &mut W,
    stats: &GraphStats,
    warnings: &[String],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Tool graph", config))?;
    writeln!(w, "  {} {}", dimmed("Tools:         ", config), stats.node_count)?;
    writeln!(w, "  {} {}", dimmed("Dependencies:  ", config), stats.edge_count)?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Dangling edges:", config),
        stats.dangling_edge_count
    )?;
    writeln!(w, "  {} {}", dimmed("Stubs:         ", config), stats.stub_count)?;
    writeln!(w, "  {} {}", dimmed("Cycles:        ", config), stats.cycle_count)?;
    writeln!(w, "  {} {}", dimmed("Leaves:        ", config), stats.leaf_count)?;
    writeln!(w, "  {} {}", dimmed("Roots:         ", config), stats.root_count)?;

    if !warnings.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            warning(&format!("Warnings ({}):", warnings.len()), config)
        )?;
        for message in warnings {
            writeln!(w, "  ! {message}")?;
        }
    }

    Ok(())
}
