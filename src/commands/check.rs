//! Check command handler: static well-formedness of scripts.

use anyhow::{bail, Result};

use loopviz::cli::ScriptArg;
use loopviz::scenario::validate;
use loopviz::tui::current_theme;
use loopviz::{Scenario, ScenarioRegistry};

use super::read_script;

/// Check the given script, or every built-in when none is given.
pub fn handle(script: &ScriptArg) -> Result<()> {
    let scenarios: Vec<Scenario> = match &script.path {
        Some(path) => vec![read_script(path)?],
        None => ScenarioRegistry::builtin().iter().cloned().collect(),
    };

    let theme = current_theme();
    let mut failed = 0;
    for scenario in &scenarios {
        let issues = validate(scenario);
        if issues.is_empty() {
            println!(
                "{} {} ({} steps)",
                theme.success_text("ok"),
                scenario.id,
                scenario.steps.len()
            );
        } else {
            failed += 1;
            println!("{} {}", theme.error_text("FAIL"), scenario.id);
            for issue in issues {
                println!("  {}", issue);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} scripts are not well-formed", failed, scenarios.len());
    }
    Ok(())
}
