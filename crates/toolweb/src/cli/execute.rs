//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Query
//! commands take a loaded [`App`] and only read from its graph.

use anyhow::Result;
use serde_json::json;

use super::args::{AllPathsArgs, DepsArgs, InitArgs, PathArgs, ReliabilityArgs, ToolArgs};
use crate::app::App;
use crate::error::Error;
use crate::output::{self, OutputMode};

/// Which way a neighbour query walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Tools the subject needs
    Dependencies,
    /// Tools that need the subject
    Dependents,
}

impl Direction {
    fn key(self) -> &'static str {
        match self {
            Direction::Dependencies => "dependencies",
            Direction::Dependents => "dependents",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Dependencies => "Dependencies",
            Direction::Dependents => "Dependents",
        }
    }
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing toolweb repository...");
    }

    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!("Initialized toolweb in {}", result.toolweb_dir.display());
        println!("  Config:   {}", result.config_file.display());
        println!("  Registry: {}", result.registry_file.display());
    }

    Ok(())
}

/// Execute the deps and rdeps commands
pub fn execute_neighbors(
    app: &App,
    args: &DepsArgs,
    direction: Direction,
    output_mode: OutputMode,
) -> Result<()> {
    let tool = app.require_tool(&args.tool)?;
    let graph = app.graph();

    if !args.is_transitive() {
        let neighbors = match direction {
            Direction::Dependencies => graph.dependencies(&tool.id),
            Direction::Dependents => graph.dependents(&tool.id),
        };

        match output_mode {
            OutputMode::Json => output::print_json(&json!({
                "tool": tool.id,
                "transitive": false,
                (direction.key()): neighbors,
            }))?,
            OutputMode::Text => output::to_stdout(|w, config| {
                let heading = format!("{} of {}", direction.label(), tool.id);
                output::write_tools(w, &heading, &neighbors, config)
            })?,
        }
        return Ok(());
    }

    let reached = match (direction, args.depth) {
        (Direction::Dependencies, Some(depth)) => {
            graph.transitive_dependencies_within(&tool.id, depth)
        }
        (Direction::Dependencies, None) => graph.transitive_dependencies(&tool.id),
        (Direction::Dependents, Some(depth)) => graph.transitive_dependents_within(&tool.id, depth),
        (Direction::Dependents, None) => graph.transitive_dependents(&tool.id),
    };

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "tool": tool.id,
            "transitive": true,
            "maxDepth": args.depth,
            (direction.key()): reached,
        }))?,
        OutputMode::Text => output::to_stdout(|w, config| {
            let heading = format!("Transitive {} of {}", direction.key(), tool.id);
            output::write_reached(w, &heading, &reached, config)
        })?,
    }

    Ok(())
}

/// Execute the path command
pub fn execute_path(app: &App, args: &PathArgs, output_mode: OutputMode) -> Result<()> {
    app.require_tool(&args.from)?;
    app.require_tool(&args.to)?;

    let path = app.graph().find_path(&args.from, &args.to);

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "from": args.from,
            "to": args.to,
            "path": path,
        }))?,
        OutputMode::Text => output::to_stdout(|w, config| {
            output::write_path(w, &args.from, &args.to, path.as_deref(), config)
        })?,
    }

    Ok(())
}

/// Execute the allpaths command
pub fn execute_all_paths(app: &App, args: &AllPathsArgs, output_mode: OutputMode) -> Result<()> {
    app.require_tool(&args.from)?;
    app.require_tool(&args.to)?;

    let limit = args.limit.unwrap_or(app.config().path_limit);
    let paths = app
        .graph()
        .find_all_paths(&args.from, &args.to, limit)
        .map_err(Error::from)?;

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "from": args.from,
            "to": args.to,
            "limit": limit,
            "paths": paths,
        }))?,
        OutputMode::Text => output::to_stdout(|w, config| {
            output::write_paths(w, &args.from, &args.to, &paths, limit, config)
        })?,
    }

    Ok(())
}

/// Execute the affected command
pub fn execute_affected(app: &App, args: &ToolArgs, output_mode: OutputMode) -> Result<()> {
    let tool = app.require_tool(&args.tool)?;
    let affected = app.graph().transitive_dependents(&tool.id);

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "tool": tool.id,
            "count": affected.len(),
            "affected": affected,
        }))?,
        OutputMode::Text => output::to_stdout(|w, config| {
            let heading = format!("Tools affected by changes to {}", tool.id);
            output::write_reached(w, &heading, &affected, config)
        })?,
    }

    Ok(())
}

/// Execute the blast-radius command
pub fn execute_blast_radius(app: &App, args: &ToolArgs, output_mode: OutputMode) -> Result<()> {
    let tool = app.require_tool(&args.tool)?;
    let report = app
        .graph()
        .analyze_impact(&tool.id, &app.config().impact_options())
        .ok_or_else(|| Error::ToolNotFound(tool.id.clone()))?;

    tracing::debug!(summary = %report.summary(), "Analyzed impact");

    match output_mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Text => {
            output::to_stdout(|w, config| output::write_impact(w, &report, config))?;
        }
    }

    Ok(())
}

/// Execute the chain-reliability command
pub fn execute_chain_reliability(
    app: &App,
    args: &ReliabilityArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let tool = app.require_tool(&args.tool)?;
    let threshold = args.threshold.unwrap_or(app.config().reliability_threshold);
    let chain = app
        .graph()
        .chain_reliability(&tool.id, threshold)
        .map_err(Error::from)?
        .ok_or_else(|| Error::ToolNotFound(tool.id.clone()))?;

    match output_mode {
        OutputMode::Json => output::print_json(&chain)?,
        OutputMode::Text => {
            output::to_stdout(|w, config| output::write_chain_reliability(w, &chain, config))?;
        }
    }

    Ok(())
}

/// Execute the graph command
pub fn execute_graph(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.graph();

    match output_mode {
        OutputMode::Json => output::print_json(&graph.export())?,
        OutputMode::Text => {
            let stats = graph.stats();
            let warnings = app.warnings();
            output::to_stdout(|w, config| output::write_stats(w, &stats, &warnings, config))?;
        }
    }

    Ok(())
}

/// Execute the cycles command
pub fn execute_cycles(app: &App, output_mode: OutputMode) -> Result<()> {
    let cycles = app.graph().find_cycles();

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "hasCycle": !cycles.is_empty(),
            "cycles": cycles,
        }))?,
        OutputMode::Text => output::to_stdout(|w, config| output::write_cycles(w, &cycles, config))?,
    }

    Ok(())
}

/// Execute the order command
pub fn execute_order(app: &App, output_mode: OutputMode) -> Result<()> {
    let build = app.graph().build_order();

    match output_mode {
        OutputMode::Json => output::print_json(&json!({
            "complete": build.is_complete(),
            "order": build.order,
            "blocked": build.blocked,
        }))?,
        OutputMode::Text => {
            output::to_stdout(|w, config| output::write_build_order(w, &build, config))?;
        }
    }

    Ok(())
}
