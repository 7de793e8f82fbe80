//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate a tool id given on the command line.
///
/// Ids are free-form but must be non-empty and contain no whitespace, since
/// registries never produce such ids and they usually indicate a quoting
/// mistake.
pub fn validate_tool_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Tool ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!("Tool ID cannot contain whitespace: '{s}'"));
    }

    Ok(s.to_string())
}

/// Validate a result limit (at least 1).
pub fn validate_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid limit '{s}': expected a positive integer"))?;

    if limit == 0 {
        return Err("Limit must be at least 1".to_string());
    }

    Ok(limit)
}

/// Validate a reliability threshold in `[0, 1]`.
pub fn validate_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid threshold '{s}': expected a number between 0 and 1"))?;

    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Threshold must be between 0 and 1, got {s}"));
    }

    Ok(threshold)
}
