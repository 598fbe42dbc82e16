//! Board model shared by the playback thread and the draw loop.
//!
//! The engine drives the board through [`Renderer`]; the draw loop reads a
//! [`BoardView`] each frame and pushes the container regions it laid out
//! back with [`Board::set_layout`]. Token geometry is derived from those
//! regions, so `locate` and `reserve_slot` match what is on screen.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::engine::clock::clamp_speed;
use crate::engine::{Flight, Renderer, Timing};
use crate::model::{ContainerKind, Engine, Step, Token};
use crate::tui::ui::lerp_rect;

/// How long a new token stays highlighted
pub const FRESH_FOR: Duration = Duration::from_millis(400);

/// A token drawn inside a container.
#[derive(Debug, Clone)]
pub struct TokenVisual {
    pub token: Token,
    pub completed: bool,
    /// Source visual of a running transfer; keeps its slot but is not drawn
    pub hidden: bool,
    pub born: Instant,
}

impl TokenVisual {
    pub fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.born) < FRESH_FOR
    }
}

/// Something moving across the board.
#[derive(Debug, Clone)]
pub struct Motion {
    pub token: Token,
    pub from: Rect,
    pub to: Rect,
    started: Instant,
    span: Duration,
}

impl Motion {
    fn new(token: Token, from: Rect, to: Rect, span: Duration) -> Self {
        Self {
            token,
            from,
            to,
            started: Instant::now(),
            span,
        }
    }

    /// Fraction of the motion done at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.span.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.span.as_secs_f64()).min(1.0)
    }

    pub fn rect_at(&self, now: Instant) -> Rect {
        lerp_rect(self.from, self.to, self.progress(now))
    }
}

/// Screen regions the draw loop assigned to containers and engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub containers: [Option<Rect>; 5],
    pub engines: [Option<Rect>; 2],
}

impl BoardLayout {
    pub fn container(&self, kind: ContainerKind) -> Option<Rect> {
        self.containers[kind.index()]
    }

    pub fn engine(&self, engine: Engine) -> Option<Rect> {
        self.engines[engine as usize]
    }
}

/// The step being applied, for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    pub index: usize,
    pub total: usize,
    pub label: String,
}

/// Everything the draw loop needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub containers: [Vec<TokenVisual>; 5],
    pub flights: Vec<Motion>,
    pub connections: Vec<Motion>,
    pub step: Option<StepInfo>,
    pub active: Option<String>,
    pub paused: bool,
}

impl BoardView {
    pub fn container(&self, kind: ContainerKind) -> &[TokenVisual] {
        &self.containers[kind.index()]
    }
}

#[derive(Default)]
struct BoardState {
    view: BoardView,
    layout: BoardLayout,
}

/// Renderer backing the interactive board.
pub struct Board {
    state: Mutex<BoardState>,
    /// Playback speed; motions last their nominal time divided by this
    speed: f64,
    /// Nominal time a connection marker is on screen
    connection_time: Duration,
}

impl Board {
    pub fn new(timing: Timing, speed: f64) -> Self {
        Self {
            state: Mutex::new(BoardState::default()),
            speed: clamp_speed(speed),
            connection_time: timing.step_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_layout(&self, layout: BoardLayout) {
        self.lock().layout = layout;
    }

    pub fn layout(&self) -> BoardLayout {
        self.lock().layout
    }

    pub fn view(&self) -> BoardView {
        self.lock().view.clone()
    }

    fn scaled(&self, duration: Duration) -> Duration {
        duration.div_f64(self.speed)
    }
}

/// Row rect of the `index`th token in a container drawn in `area`.
///
/// Call stacks grow upward from the bottom border; queues and the heap fill
/// from the top. Positions past the last row stick to the last row.
pub fn slot_rect(area: Rect, kind: ContainerKind, index: usize) -> Rect {
    let inner = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    let rows = inner.height.max(1);
    let offset = (index as u16).min(rows - 1);
    let y = if kind.is_call_stack() {
        inner.y + rows - 1 - offset
    } else {
        inner.y + offset
    };
    Rect::new(inner.x, y, inner.width, 1)
}

impl Renderer for Board {
    fn create_token(&self, kind: ContainerKind, token: &Token) {
        self.lock().view.containers[kind.index()].push(TokenVisual {
            token: token.clone(),
            completed: false,
            hidden: false,
            born: Instant::now(),
        });
    }

    fn mark_completed(&self, kind: ContainerKind, id: &str) {
        let mut state = self.lock();
        if let Some(visual) = state.view.containers[kind.index()]
            .iter_mut()
            .find(|v| v.token.id == id)
        {
            visual.completed = true;
        }
    }

    fn remove_token(&self, kind: ContainerKind, id: &str) {
        let mut state = self.lock();
        state.view.containers[kind.index()].retain(|v| v.token.id != id);
        state.view.flights.retain(|f| f.token.id != id);
    }

    fn clear(&self) {
        let mut state = self.lock();
        for list in state.view.containers.iter_mut() {
            list.clear();
        }
        state.view.flights.clear();
        state.view.connections.clear();
        state.view.step = None;
    }

    fn has_anchor(&self, kind: ContainerKind) -> bool {
        self.lock().layout.container(kind).is_some()
    }

    fn locate(&self, kind: ContainerKind, id: &str) -> Option<Rect> {
        let state = self.lock();
        let area = state.layout.container(kind)?;
        let index = state.view.containers[kind.index()]
            .iter()
            .position(|v| v.token.id == id)?;
        Some(slot_rect(area, kind, index))
    }

    fn reserve_slot(&self, kind: ContainerKind, _token: &Token) -> Option<Rect> {
        let state = self.lock();
        let area = state.layout.container(kind)?;
        Some(slot_rect(area, kind, state.view.containers[kind.index()].len()))
    }

    fn animate_transfer(&self, flight: &Flight) {
        let span = self.scaled(flight.duration);
        let mut state = self.lock();
        if let Some(visual) = state.view.containers[flight.source.index()]
            .iter_mut()
            .find(|v| v.token.id == flight.token.id)
        {
            visual.hidden = true;
        }
        state
            .view
            .flights
            .push(Motion::new(flight.token.clone(), flight.from, flight.to, span));
    }

    fn draw_connection(&self, marker: &Token, from: Engine, to: Engine) {
        let mut state = self.lock();
        let (Some(a), Some(b)) = (state.layout.engine(from), state.layout.engine(to)) else {
            return;
        };
        let width = (marker.label.chars().count() as u16 + 4).min(a.width.max(1));
        let start = Rect::new(a.x + a.width.saturating_sub(width) / 2, a.y + a.height / 2, width, 1);
        let end = Rect::new(b.x + b.width.saturating_sub(width) / 2, b.y + b.height / 2, width, 1);
        let span = self.scaled(self.connection_time);
        state
            .view
            .connections
            .push(Motion::new(marker.clone(), start, end, span));
    }

    fn discard_connection(&self, id: &str) {
        self.lock().view.connections.retain(|c| c.token.id != id);
    }

    fn step_started(&self, index: usize, total: usize, step: &Step) {
        self.lock().view.step = Some(StepInfo {
            index,
            total,
            label: step.label.clone(),
        });
    }

    fn pause_changed(&self, paused: bool) {
        self.lock().view.paused = paused;
    }

    fn run_changed(&self, scenario_id: &str, running: bool) {
        let mut state = self.lock();
        state.view.active = running.then(|| scenario_id.to_string());
        if !running {
            state.view.paused = false;
            state.view.step = None;
        }
    }
}
