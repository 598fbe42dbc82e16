//! The interactive board: tabs, code, containers and controls.
//!
//! Runs happen on a background thread through [`Player::spawn`]; this app
//! only turns keys into player calls and draws what the [`Board`] holds.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Tabs},
    Frame,
};
use tracing::{error, warn};

use super::app::status_footer::{render_footer, render_status_line};
use super::board::{Board, BoardView};
use super::theme::{current_theme, Theme};
use super::ui::screen_layout;
use super::widgets::{CodePanel, ContainerPanel, HelpOverlay, MovingToken};
use crate::model::ContainerKind;
use crate::player::{Player, RunHandle, SessionStatus};
use crate::scenario::Scenario;

/// Containers drawn inside the main engine panel
const MAIN_CONTAINERS: [ContainerKind; 4] = [
    ContainerKind::CallStack,
    ContainerKind::Heap,
    ContainerKind::MicrotaskQueue,
    ContainerKind::MacrotaskQueue,
];

pub struct VisualizerApp {
    player: Player,
    board: Arc<Board>,
    selected: usize,
    show_help: bool,
    handle: Option<RunHandle>,
    /// Last problem worth showing in the status line
    notice: Option<String>,
    quit: bool,
}

impl VisualizerApp {
    /// `player` must render into `board`.
    pub fn new(player: Player, board: Arc<Board>, initial: &str) -> Self {
        let selected = player.registry().position(initial).unwrap_or(0);
        Self {
            player,
            board,
            selected,
            show_help: false,
            handle: None,
            notice: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    fn selected_scenario(&self) -> Option<&Scenario> {
        self.player.registry().iter().nth(self.selected)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_scenario().map(|s| s.id.as_str())
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            // === Quit ===
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }

            // === Playback controls ===
            KeyCode::Char('r') | KeyCode::Enter => self.start_run(),
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.player.toggle_pause();
            }
            KeyCode::Char('x') => {
                if self.player.reset() {
                    self.notice = None;
                }
            }

            // === Scenario selection ===
            KeyCode::Left | KeyCode::BackTab => self.select_offset(-1),
            KeyCode::Right | KeyCode::Tab => self.select_offset(1),

            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn select_offset(&mut self, delta: isize) {
        // Tabs are locked while a run is active
        if self.player.is_running() {
            return;
        }
        let count = self.player.registry().len() as isize;
        if count == 0 {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(count) as usize;
    }

    fn start_run(&mut self) {
        let Some(id) = self.selected_id().map(str::to_string) else {
            return;
        };
        match self.player.spawn(&id) {
            Ok(Some(handle)) => {
                self.notice = None;
                self.handle = Some(handle);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(scenario = %id, error = %err, "run not started");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Collect a finished run, if any.
    pub fn on_tick(&mut self) {
        if !self.handle.as_ref().is_some_and(|h| h.is_finished()) {
            return;
        }
        let Some(handle) = self.handle.take() else {
            return;
        };
        match handle.join() {
            Ok(Ok(summary)) if summary.skipped > 0 => {
                self.notice = Some(format!(
                    "{} of {} steps skipped (see log)",
                    summary.skipped, summary.steps
                ));
            }
            Ok(Ok(_)) => {}
            Ok(Err(err)) => self.notice = Some(err.to_string()),
            Err(_) => {
                error!("playback thread panicked");
                self.notice = Some("playback stopped unexpectedly".to_string());
            }
        }
    }

    /// Whether a finished run still waits to be collected.
    pub fn has_pending_run(&self) -> bool {
        self.handle.is_some()
    }

    pub fn draw(&self, frame: &mut Frame) {
        let theme = current_theme();
        let scenario = self.selected_scenario();
        let with_worker = scenario.is_some_and(Scenario::uses_worker);
        let layout = screen_layout(frame.area(), with_worker);
        self.board.set_layout(layout.board);

        let view = self.board.view();
        let status = self.player.status();
        let now = Instant::now();

        self.draw_tabs(frame, layout.tabs, &theme, status.running);

        let running_here = match (scenario, view.active.as_deref()) {
            (Some(s), Some(active)) => s.id == active,
            _ => false,
        };
        frame.render_widget(
            CodePanel::new(scenario.and_then(|s| s.listing.as_ref()), &theme)
                .running(running_here),
            layout.code,
        );

        frame.render_widget(engine_block("Main Thread", &theme), layout.main_engine);
        for kind in MAIN_CONTAINERS {
            if let Some(area) = layout.board.container(kind) {
                frame.render_widget(
                    ContainerPanel::new(kind, view.container(kind), &theme).at(now),
                    area,
                );
            }
        }
        if let Some(worker) = layout.worker_engine {
            frame.render_widget(engine_block("Worker Thread", &theme), worker);
            if let Some(area) = layout.board.container(ContainerKind::WorkerCallStack) {
                let kind = ContainerKind::WorkerCallStack;
                frame.render_widget(
                    ContainerPanel::new(kind, view.container(kind), &theme).at(now),
                    area,
                );
            }
        }

        draw_motions(frame, &view, &theme, now);

        let step_label = view.step.as_ref().map(|s| s.label.as_str());
        render_status_line(frame, layout.status, &status, step_label, self.notice.as_deref());
        render_footer(frame, layout.footer, &self.footer_keys(&status));

        if self.show_help {
            frame.render_widget(HelpOverlay::new(&theme), frame.area());
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect, theme: &Theme, locked: bool) {
        let titles: Vec<Line> = self
            .player
            .registry()
            .iter()
            .map(|s| Line::from(s.display_title().to_string()))
            .collect();
        let base = if locked {
            theme.text_secondary_style()
        } else {
            theme.text_style()
        };
        let tabs = Tabs::new(titles)
            .select(self.selected)
            .style(base)
            .highlight_style(theme.accent_bold_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.text_secondary_style())
                    .title(Span::styled(" loopviz ", theme.accent_bold_style())),
            );
        frame.render_widget(tabs, area);
    }

    fn footer_keys(&self, status: &SessionStatus) -> Vec<(&'static str, &'static str)> {
        if self.show_help {
            return vec![("any key", "close help")];
        }
        match (status.running, status.paused) {
            (true, true) => vec![("Space", "resume"), ("?", "help"), ("q", "quit")],
            (true, false) => vec![("Space", "pause"), ("?", "help"), ("q", "quit")],
            (false, _) => vec![
                ("r", "run"),
                ("x", "reset"),
                ("<-/->", "scenario"),
                ("?", "help"),
                ("q", "quit"),
            ],
        }
    }
}

fn engine_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.text_secondary_style())
        .title(Span::styled(format!(" {} ", title), theme.accent_style()))
}

fn draw_motions(frame: &mut Frame, view: &BoardView, theme: &Theme, now: Instant) {
    for flight in &view.flights {
        frame.render_widget(MovingToken::flight(&flight.token, theme), flight.rect_at(now));
    }
    for connection in &view.connections {
        frame.render_widget(
            MovingToken::connection(&connection.token, theme),
            connection.rect_at(now),
        );
    }
}
