//! Subcommand handlers, one file per command.

pub mod check;
pub mod completions;
pub mod config;
pub mod export;
pub mod list;
pub mod play;
pub mod run;
pub mod show;

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use loopviz::cli::ScriptArg;
use loopviz::{Scenario, ScenarioRegistry};

/// Built-in registry plus the `--script` scenario, if any.
///
/// Returns the id of the loaded script so callers can select it.
pub fn load_registry(script: &ScriptArg) -> Result<(ScenarioRegistry, Option<String>)> {
    let mut registry = ScenarioRegistry::builtin();
    let Some(path) = &script.path else {
        return Ok((registry, None));
    };

    let scenario = read_script(path)?;
    let id = scenario.id.clone();
    registry.register(scenario)?;
    info!(id = %id, path = %path.display(), "loaded script");
    Ok((registry, Some(id)))
}

pub fn read_script(path: &std::path::Path) -> Result<Scenario> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    Scenario::from_json(&json).with_context(|| format!("Invalid script {}", path.display()))
}
