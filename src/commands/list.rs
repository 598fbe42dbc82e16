//! List command handler

use anyhow::Result;

use loopviz::tui::current_theme;
use loopviz::ScenarioRegistry;

pub fn handle() -> Result<()> {
    let registry = ScenarioRegistry::builtin();
    let theme = current_theme();
    let width = registry.ids().map(str::len).max().unwrap_or(0);

    for scenario in registry.iter() {
        let worker = if scenario.uses_worker() { "  [worker]" } else { "" };
        println!(
            "{}  {}  {}{}",
            theme.accent_text(&format!("{:<width$}", scenario.id, width = width)),
            theme.primary_text(scenario.display_title()),
            theme.secondary_text(&format!("{} steps", scenario.steps.len())),
            theme.secondary_text(worker),
        );
    }
    Ok(())
}
