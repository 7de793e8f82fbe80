//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the toolweb binary built for this test run
pub fn toolweb_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_toolweb"))
}

/// Run the toolweb binary in the specified directory with colors disabled
pub fn run_toolweb_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(toolweb_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("TOOLWEB_ASCII")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute toolweb binary")
}

/// Stdout of a run that must have succeeded
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "toolweb failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Parsed JSON stdout of a run that must have succeeded
pub fn json_of(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout_of(output)).expect("stdout is not valid JSON")
}

/// Build a registry line for a tool
pub fn tool(id: &str, tool_type: &str, reliability: f64, debt_score: u32) -> String {
    format!(
        r#"{{"record":"tool","id":"{id}","name":"{id}","type":"{tool_type}","reliability":{reliability},"debtScore":{debt_score}}}"#
    )
}

/// Build a registry line for a dependency edge
pub fn dependency(from: &str, to: &str) -> String {
    format!(r#"{{"record":"dependency","from":"{from}","to":"{to}"}}"#)
}

/// Write registry lines to `path`, one record per line
pub fn write_registry(path: &Path, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).expect("Failed to write registry");
}
