//! Run command handler: headless transcript.

use std::io;
use std::sync::Arc;

use anyhow::Result;

use loopviz::cli::ScriptArg;
use loopviz::engine::{Clock, InstantClock, SystemClock, Timing};
use loopviz::player::{ConsoleRenderer, Player, RunOutcome};
use loopviz::tui::current_theme;
use loopviz::tui::theme::no_color;
use loopviz::{Config, ScenarioRegistry};

use super::load_registry;

pub fn handle(
    config: &Config,
    scenario: &str,
    script: &ScriptArg,
    instant: bool,
    speed: Option<f64>,
) -> Result<()> {
    let (registry, _) = load_registry(script)?;
    let clock: Arc<dyn Clock> = if instant {
        Arc::new(InstantClock)
    } else {
        Arc::new(SystemClock::new(speed.unwrap_or_else(|| config.speed())))
    };
    run_headless(registry, scenario, clock)
}

/// Play `scenario` to the end, writing the transcript to stdout.
pub fn run_headless(
    registry: ScenarioRegistry,
    scenario: &str,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let out = Box::new(io::stdout());
    let renderer = if no_color() {
        ConsoleRenderer::plain(out)
    } else {
        ConsoleRenderer::new(out, current_theme())
    };

    let player = Player::new(
        Arc::new(registry),
        Arc::new(renderer),
        clock,
        Timing::default(),
    );

    match player.run(scenario)? {
        RunOutcome::Completed(summary) if summary.skipped > 0 => {
            let theme = current_theme();
            eprintln!(
                "{}",
                theme.secondary_text(&format!(
                    "{} of {} steps skipped (see log)",
                    summary.skipped, summary.steps
                ))
            );
            Ok(())
        }
        RunOutcome::Completed(_) => Ok(()),
        // A fresh player holds no run
        RunOutcome::Rejected => anyhow::bail!("another run is already active"),
    }
}
