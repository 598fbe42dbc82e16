//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Run the loopviz binary without colors and capture its output.
///
/// Returns `(stdout, stderr, exit_code)`.
pub fn run_loopviz(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_loopviz"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute loopviz");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// A two-step script that enters and leaves the call stack.
pub const TINY_SCRIPT: &str = r#"{
  "id": "tiny",
  "title": "Tiny",
  "initial_heap": ["x: 1"],
  "steps": [
    { "token_id": "f", "label": "f()", "destination": "call_stack", "category": "sync" },
    { "token_id": "f", "label": "f()", "source": "call_stack", "category": "sync" }
  ]
}"#;

/// Write `contents` to a file inside a fresh temp dir.
pub fn temp_script(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write script");
    (dir, path)
}
