//! Headless renderer: prints a line per visual change.
//!
//! Used by `loopviz run` and by `play` when stdout is not a terminal. Rows
//! stand in for geometry so the engine can still locate tokens and reserve
//! landing slots.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use ratatui::layout::Rect;
use tracing::debug;

use crate::engine::{Flight, Renderer};
use crate::model::{Category, ContainerKind, Engine, Step, Token};
use crate::tui::theme::Theme;

/// Column width of the container name in transcript lines
const KIND_WIDTH: usize = 18;

struct Transcript {
    out: Box<dyn Write + Send>,
    visuals: HashMap<ContainerKind, Vec<Token>>,
    /// `(index, total)` of the step being applied
    step: Option<(usize, usize)>,
    /// Token whose transfer line has been printed; its landing stays quiet
    landing: Option<String>,
}

pub struct ConsoleRenderer {
    inner: Mutex<Transcript>,
    theme: Option<Theme>,
}

impl ConsoleRenderer {
    /// Colored transcript using `theme`.
    pub fn new(out: Box<dyn Write + Send>, theme: Theme) -> Self {
        Self::build(out, Some(theme))
    }

    /// Transcript without escape codes.
    pub fn plain(out: Box<dyn Write + Send>) -> Self {
        Self::build(out, None)
    }

    fn build(out: Box<dyn Write + Send>, theme: Option<Theme>) -> Self {
        Self {
            inner: Mutex::new(Transcript {
                out,
                visuals: HashMap::new(),
                step: None,
                landing: None,
            }),
            theme,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn accent(&self, text: &str) -> String {
        match &self.theme {
            Some(theme) => theme.accent_text(text),
            None => text.to_string(),
        }
    }

    fn dim(&self, text: &str) -> String {
        match &self.theme {
            Some(theme) => theme.secondary_text(text),
            None => text.to_string(),
        }
    }

    fn tinted(&self, category: Category, text: &str) -> String {
        match &self.theme {
            Some(theme) => theme.category_text(category, text),
            None => text.to_string(),
        }
    }

    /// Write one event line, prefixed with the current step counter.
    fn event(&self, inner: &mut Transcript, sign: &str, what: &str, label: String) {
        let prefix = match inner.step {
            Some((index, total)) => {
                let width = total.to_string().len();
                format!("[{:>width$}/{}]", index + 1, total, width = width)
            }
            None => "[heap]".to_string(),
        };
        let line = format!(
            "{} {} {:<kind$} {}",
            self.dim(&prefix),
            self.accent(sign),
            what,
            label,
            kind = KIND_WIDTH
        );
        emit(inner, &line);
    }
}

fn emit(inner: &mut Transcript, line: &str) {
    if let Err(err) = writeln!(inner.out, "{}", line).and_then(|_| inner.out.flush()) {
        debug!(error = %err, "transcript write failed");
    }
}

fn row_rect(kind: ContainerKind, row: usize) -> Rect {
    Rect::new(kind.index() as u16 * 24, row as u16, 24, 1)
}

impl Renderer for ConsoleRenderer {
    fn create_token(&self, kind: ContainerKind, token: &Token) {
        let mut inner = self.lock();
        inner.visuals.entry(kind).or_default().push(token.clone());
        if inner.landing.as_deref() == Some(token.id.as_str()) {
            inner.landing = None;
            return;
        }
        let label = self.tinted(token.category, &token.label);
        self.event(&mut inner, "+", kind.label(), label);
    }

    fn mark_completed(&self, kind: ContainerKind, id: &str) {
        let mut inner = self.lock();
        let Some(token) = inner
            .visuals
            .get(&kind)
            .and_then(|list| list.iter().find(|t| t.id == id))
            .cloned()
        else {
            return;
        };
        let label = self.dim(&token.label);
        self.event(&mut inner, "✓", kind.label(), label);
    }

    fn remove_token(&self, kind: ContainerKind, id: &str) {
        let mut inner = self.lock();
        let Some(list) = inner.visuals.get_mut(&kind) else {
            return;
        };
        let Some(pos) = list.iter().position(|t| t.id == id) else {
            return;
        };
        let token = list.remove(pos);
        if inner.landing.as_deref() == Some(id) {
            return;
        }
        let label = self.tinted(token.category, &token.label);
        self.event(&mut inner, "-", kind.label(), label);
    }

    fn clear(&self) {
        let mut inner = self.lock();
        inner.visuals.clear();
        inner.step = None;
        inner.landing = None;
    }

    fn locate(&self, kind: ContainerKind, id: &str) -> Option<Rect> {
        let inner = self.lock();
        let row = inner.visuals.get(&kind)?.iter().position(|t| t.id == id)?;
        Some(row_rect(kind, row))
    }

    fn reserve_slot(&self, kind: ContainerKind, _token: &Token) -> Option<Rect> {
        let inner = self.lock();
        let row = inner.visuals.get(&kind).map(Vec::len).unwrap_or(0);
        Some(row_rect(kind, row))
    }

    fn animate_transfer(&self, flight: &Flight) {
        let mut inner = self.lock();
        inner.landing = Some(flight.token.id.clone());
        let route = format!("{} -> {}", flight.source.label(), flight.destination.label());
        let label = self.tinted(flight.token.category, &flight.token.label);
        self.event(&mut inner, "~", &route, label);
    }

    fn draw_connection(&self, marker: &Token, from: Engine, to: Engine) {
        let mut inner = self.lock();
        let route = format!("{} -> {}", from.label(), to.label());
        let label = self.tinted(marker.category, &marker.label);
        self.event(&mut inner, "=", &route, label);
    }

    fn discard_connection(&self, _id: &str) {}

    fn step_started(&self, index: usize, total: usize, _step: &Step) {
        self.lock().step = Some((index, total));
    }

    fn pause_changed(&self, paused: bool) {
        let mut inner = self.lock();
        let line = if paused {
            self.accent("|| paused")
        } else {
            self.accent("|> resumed")
        };
        emit(&mut inner, &line);
    }

    fn run_changed(&self, scenario_id: &str, running: bool) {
        let mut inner = self.lock();
        let line = if running {
            self.accent(&format!("> {}", scenario_id))
        } else {
            inner.step = None;
            self.accent(&format!("# {} done", scenario_id))
        };
        emit(&mut inner, &line);
    }
}
