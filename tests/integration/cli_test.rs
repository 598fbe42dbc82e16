//! Integration tests for the loopviz CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_loopviz, temp_script, TINY_SCRIPT};

fn loopviz() -> Command {
    let mut cmd = Command::cargo_bin("loopviz").expect("binary should be built");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Usage
// ============================================================================

#[test]
fn help_lists_every_subcommand() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["--help"]);

    assert_eq!(exit_code, 0);
    for name in [
        "play",
        "run",
        "list",
        "show",
        "check",
        "export",
        "config",
        "completions",
    ] {
        assert!(stdout.contains(name), "missing {} in help", name);
    }
}

#[test]
fn run_help_mentions_instant_and_speed() {
    loopviz()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--instant"))
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--script"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_loopviz(&[]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("Usage"));
}

#[test]
fn run_without_scenario_is_usage_error() {
    loopviz()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SCENARIO>"));
}

// ============================================================================
// Headless Playback
// ============================================================================

#[test]
fn run_instant_priority() {
    let (stdout, stderr, exit_code) = run_loopviz(&["run", "priority", "--instant"]);
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    insta::assert_snapshot!("run_instant_priority", stdout);
}

#[test]
fn run_instant_timeout_moves_callback_through_queue() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["run", "timeout", "--instant"]);

    assert_eq!(exit_code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"> timeout"));
    assert_eq!(lines.last(), Some(&"# timeout done"));
    assert!(stdout.contains("~ Macrotask Queue -> Call Stack setTimeout_Callback"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("[heap]")).count(), 3);
}

#[test]
fn run_instant_worker_draws_connections_both_ways() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["run", "worker", "--instant"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("= Main Thread -> Worker Thread Worker Connection"));
    assert!(stdout.contains("= Worker Thread -> Main Thread Worker Connection"));
    assert!(stdout.contains("+ Worker Call Stack  worker.onmessage"));
}

#[test]
fn run_unknown_scenario_fails() {
    let (stdout, stderr, exit_code) = run_loopviz(&["run", "interval", "--instant"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown scenario: interval"));
}

#[test]
fn play_without_terminal_prints_transcript() {
    // stdout is a pipe here, so play falls back to the headless transcript
    let (_dir, config) = fast_config();
    loopviz()
        .args(["play", "priority"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("> priority"))
        .stdout(predicate::str::contains("# priority done"));
}

/// Config file running at the fastest speed the clamp allows.
fn fast_config() -> (TempDir, std::path::PathBuf) {
    temp_script("config.toml", "[playback]\nspeed = 16.0\n")
}

// ============================================================================
// Scenario Commands
// ============================================================================

#[test]
fn list_shows_all_builtins_in_tab_order() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["list"]);

    assert_eq!(exit_code, 0);
    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(
        ids,
        vec!["timeout", "promise", "async", "complex", "priority", "worker"]
    );
    let worker_line = stdout.lines().find(|l| l.starts_with("worker")).unwrap();
    assert!(worker_line.contains("[worker]"));
}

#[test]
fn show_prints_listing_and_steps() {
    loopviz()
        .args(["show", "timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setTimeout"))
        .stdout(predicate::str::contains("console.log('B');"))
        .stdout(predicate::str::contains("setTimeout_Callback"));
}

#[test]
fn check_accepts_every_builtin() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["check"]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "ok timeout (13 steps)\n\
         ok promise (15 steps)\n\
         ok async (17 steps)\n\
         ok complex (29 steps)\n\
         ok priority (14 steps)\n\
         ok worker (23 steps)\n"
    );
}

#[test]
fn check_reports_malformed_script() {
    let (_dir, path) = temp_script(
        "bad.json",
        r#"{"id":"bad","steps":[{"token_id":"x","label":"x","source":"call_stack","category":"sync"}]}"#,
    );
    let (stdout, stderr, exit_code) = run_loopviz(&["check", "--script", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stdout.starts_with("FAIL bad"));
    assert!(stderr.contains("not well-formed"));
}

#[test]
fn export_round_trips_through_script() {
    let (stdout, _stderr, exit_code) = run_loopviz(&["export", "promise"]);
    assert_eq!(exit_code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("export is JSON");
    assert_eq!(json["id"], "promise");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(15));
}

#[test]
fn run_loads_external_script() {
    let (_dir, path) = temp_script("tiny.json", TINY_SCRIPT);
    let (stdout, stderr, exit_code) = run_loopviz(&[
        "run",
        "tiny",
        "--instant",
        "--script",
        path.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("[heap] + Heap               x: 1"));
    assert!(stdout.contains("[1/2] + Call Stack         f()"));
    assert!(stdout.contains("[2/2] - Call Stack         f()"));
}

#[test]
fn missing_script_file_fails() {
    loopviz()
        .args(["check", "--script", "/nonexistent/script.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read script"));
}

// ============================================================================
// Config and Completions
// ============================================================================

#[test]
fn config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    loopviz()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    loopviz()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# loopviz configuration, created "));
    assert!(written.contains("[playback]"));
    assert!(written.contains("default_scenario = \"timeout\""));

    loopviz()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_show_reflects_file() {
    let (_dir, path) = temp_script("config.toml", "[ui]\ntheme = \"ocean\"\n");

    loopviz()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = \"ocean\""))
        .stdout(predicate::str::contains("speed = 1.0"))
        .stdout(predicate::str::contains("step_delay_ms").not());
}

#[test]
fn invalid_config_fails() {
    let (_dir, path) = temp_script("config.toml", "[playback\n");

    loopviz()
        .args(["list", "--config"])
        .arg(&path)
        .assert()
        .code(1);
}

#[test]
fn completions_generate_for_bash() {
    loopviz()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loopviz"));
}
