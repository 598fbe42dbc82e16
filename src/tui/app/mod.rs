//! Terminal lifecycle and the draw/input loop.
//!
//! The loop redraws on a fixed tick so animations advance even when no key
//! is pressed. Raw mode and the alternate screen are restored on every exit
//! path, including panics unwinding through [`TerminalGuard`].

pub mod status_footer;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use super::visualizer::VisualizerApp;

/// Restores the terminal when dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Run the board until the user quits.
///
/// # Arguments
/// * `app` - The visualizer to drive
/// * `tick` - Redraw interval
#[cfg(not(tarpaulin_include))]
pub fn run(mut app: VisualizerApp, tick: Duration) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    info!(tick_ms = tick.as_millis() as u64, "board opened");

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(cols, rows) => debug!(cols, rows, "terminal resized"),
                _ => {}
            }
        }
        app.on_tick();

        if app.should_quit() {
            break;
        }
    }

    info!(running = app.player().is_running(), "board closed");
    Ok(())
}
