//! Play command handler: the interactive board.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use loopviz::cli::ScriptArg;
use loopviz::engine::{SystemClock, Timing};
use loopviz::tui::{app, Board, VisualizerApp};
use loopviz::{Config, Player};

use super::{load_registry, run};

/// Both ends of the session are a terminal.
pub fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin)
}

/// Open the board on `scenario`, or fall back to a paced transcript when
/// stdout is not a terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, scenario: Option<String>, script: &ScriptArg) -> Result<()> {
    let (registry, loaded) = load_registry(script)?;
    let id = scenario
        .or(loaded)
        .unwrap_or_else(|| config.playback.default_scenario.clone());
    registry.get(&id)?;

    let clock = Arc::new(SystemClock::new(config.speed()));
    if !is_tty() {
        info!(scenario = %id, "no terminal, playing transcript");
        return run::run_headless(registry, &id, clock);
    }

    let board = Arc::new(Board::new(Timing::default(), config.speed()));
    let player = Player::new(Arc::new(registry), board.clone(), clock, Timing::default());
    let app = VisualizerApp::new(player, board, &id);
    app::run(app, config.tick())
}
