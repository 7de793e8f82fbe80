//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Healthy: green   (LOW risk, reliability above threshold)
//!   - Warning:         yellow  (MEDIUM risk, warnings)
//!   - Error/Danger:    red     (HIGH/CRITICAL risk, cycles, weak links)
//!   - Info/Reference:  cyan    (tool ids)
//!   - Accent:          magenta (tool types)
//!   - Muted:           dimmed  (field labels, depths, connectors)
//!   - Emphasis:        bold    (section headers)

use colored::Colorize;
use toolweb_graph::{RiskLevel, ToolType};

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize a tool id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize a tool type (magenta).
pub(crate) fn colorize_type(tool_type: ToolType, config: &OutputConfig) -> String {
    let text = tool_type.to_string();
    if !config.use_colors {
        return text;
    }
    text.magenta().to_string()
}

/// Apply color to a risk level by severity.
pub(crate) fn colorize_risk(level: RiskLevel, config: &OutputConfig) -> String {
    let text = level.to_string();
    if !config.use_colors {
        return text;
    }
    match level {
        RiskLevel::Low => text.green().to_string(),
        RiskLevel::Medium => text.yellow().to_string(),
        RiskLevel::High => text.red().to_string(),
        RiskLevel::Critical => text.red().bold().to_string(),
    }
}

/// Format a reliability as a percentage, red when below `threshold`.
pub(crate) fn colorize_reliability(value: f64, threshold: f64, config: &OutputConfig) -> String {
    let text = format!("{:.2}%", value * 100.0);
    if !config.use_colors {
        return text;
    }
    if value < threshold {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Arrow used between path members, with ASCII fallback.
pub(crate) fn arrow(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "->" } else { "→" }
}

/// Bullet used for list items, with ASCII fallback.
pub(crate) fn bullet(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "-" } else { "•" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plain() -> OutputConfig {
        OutputConfig::new(false, false)
    }

    #[rstest]
    #[case::success(success("ok", &plain()))]
    #[case::error(error("ok", &plain()))]
    #[case::warning(warning("ok", &plain()))]
    #[case::bold(bold("ok", &plain()))]
    #[case::dimmed(dimmed("ok", &plain()))]
    #[case::id(colorize_id("ok", &plain()))]
    fn test_no_colors_returns_plain_text(#[case] rendered: String) {
        assert_eq!(rendered, "ok");
    }

    #[test]
    fn test_risk_and_type_labels() {
        assert_eq!(colorize_risk(RiskLevel::Critical, &plain()), "CRITICAL");
        assert_eq!(colorize_type(ToolType::Mcp, &plain()), "mcp");
    }

    #[test]
    fn test_reliability_percentage() {
        assert_eq!(colorize_reliability(0.7738, 0.9, &plain()), "77.38%");
        assert_eq!(colorize_reliability(1.0, 0.9, &plain()), "100.00%");
    }

    #[test]
    fn test_ascii_fallback() {
        let ascii = OutputConfig::new(true, false);
        assert_eq!(arrow(&ascii), "->");
        assert_eq!(bullet(&ascii), "-");
        assert_eq!(arrow(&plain()), "→");
    }
}
