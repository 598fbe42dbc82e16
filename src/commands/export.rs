//! Export command handler

use anyhow::Result;

use loopviz::ScenarioRegistry;

/// Print a built-in scenario as JSON, ready for `--script`.
pub fn handle(id: &str) -> Result<()> {
    let registry = ScenarioRegistry::builtin();
    let scenario = registry.get(id)?;
    println!("{}", scenario.to_json()?);
    Ok(())
}
