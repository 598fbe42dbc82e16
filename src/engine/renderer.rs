//! The narrow interface the engine drives its presentation through.
//!
//! The engine never computes geometry itself. It asks the renderer where a
//! token currently is and where the next one would land, and hands those
//! rectangles back when it starts a transfer animation.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use ratatui::layout::Rect;

use crate::model::{ContainerKind, Engine, Step, Token};

/// A token travelling between two containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub token: Token,
    pub source: ContainerKind,
    pub destination: ContainerKind,
    pub from: Rect,
    pub to: Rect,
    pub duration: Duration,
}

/// Presentation host for the playback engine.
///
/// Calls return once the visual change has been handed off. The step
/// executor owns every timing window, so a renderer never sleeps.
pub trait Renderer: Send + Sync {
    /// Show a new token at the end of `kind`.
    fn create_token(&self, kind: ContainerKind, token: &Token);

    /// Render a call-stack frame as finished without removing it.
    fn mark_completed(&self, kind: ContainerKind, id: &str);

    /// Discard the token visual. Unknown ids are ignored.
    fn remove_token(&self, kind: ContainerKind, id: &str);

    /// Empty every container.
    fn clear(&self);

    /// Whether `kind` has a region to render into.
    fn has_anchor(&self, _kind: ContainerKind) -> bool {
        true
    }

    /// Current position of a token, `None` if the visual is gone.
    fn locate(&self, kind: ContainerKind, id: &str) -> Option<Rect>;

    /// Position the next token appended to `kind` would occupy.
    ///
    /// `None` means the container has no anchor to render into.
    fn reserve_slot(&self, kind: ContainerKind, token: &Token) -> Option<Rect>;

    /// Start moving a token. The source visual stays hidden until removed.
    fn animate_transfer(&self, flight: &Flight);

    /// Start a marker flying between the two engine regions.
    fn draw_connection(&self, marker: &Token, from: Engine, to: Engine);

    /// Drop a connection marker.
    fn discard_connection(&self, id: &str);

    fn step_started(&self, _index: usize, _total: usize, _step: &Step) {}

    fn pause_changed(&self, _paused: bool) {}

    fn run_changed(&self, _scenario_id: &str, _running: bool) {}
}

/// A renderer with nothing to show.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn create_token(&self, _kind: ContainerKind, _token: &Token) {}
    fn mark_completed(&self, _kind: ContainerKind, _id: &str) {}
    fn remove_token(&self, _kind: ContainerKind, _id: &str) {}
    fn clear(&self) {}

    fn locate(&self, kind: ContainerKind, _id: &str) -> Option<Rect> {
        Some(Rect::new(kind.index() as u16 * 20, 0, 20, 1))
    }

    fn reserve_slot(&self, kind: ContainerKind, _token: &Token) -> Option<Rect> {
        Some(Rect::new(kind.index() as u16 * 20, 0, 20, 1))
    }

    fn animate_transfer(&self, _flight: &Flight) {}
    fn draw_connection(&self, _marker: &Token, _from: Engine, _to: Engine) {}
    fn discard_connection(&self, _id: &str) {}
}

/// Every call a [`RecordingRenderer`] has seen, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Create { kind: ContainerKind, token: Token },
    MarkCompleted { kind: ContainerKind, id: String },
    Remove { kind: ContainerKind, id: String },
    Clear,
    Transfer {
        id: String,
        source: ContainerKind,
        destination: ContainerKind,
    },
    Connection { id: String, from: Engine, to: Engine },
    DiscardConnection { id: String },
    StepStarted { index: usize },
    PauseChanged { paused: bool },
    RunChanged { scenario_id: String, running: bool },
}

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<RenderCall>,
    visuals: HashMap<ContainerKind, Vec<String>>,
    missing_anchors: HashSet<ContainerKind>,
}

/// Renderer that keeps a log of calls and a minimal visual model.
///
/// Used by tests and by hosts that want to inspect what a run did.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    inner: Mutex<Recording>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `kind` behave as if its anchor were missing from the host.
    pub fn without_anchor(self, kind: ContainerKind) -> Self {
        self.lock().missing_anchors.insert(kind);
        self
    }

    /// Drop a visual behind the engine's back.
    pub fn forget(&self, kind: ContainerKind, id: &str) {
        if let Some(list) = self.lock().visuals.get_mut(&kind) {
            list.retain(|v| v != id);
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.lock().calls.clone()
    }

    /// Ids currently visible in `kind`, in display order.
    pub fn visible(&self, kind: ContainerKind) -> Vec<String> {
        self.lock().visuals.get(&kind).cloned().unwrap_or_default()
    }

    /// Labels of tokens created in `kind`, in creation order.
    pub fn created_labels(&self, kind: ContainerKind) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Create { kind: k, token } if *k == kind => Some(token.label.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: RenderCall) {
        self.lock().calls.push(call);
    }
}

impl Renderer for RecordingRenderer {
    fn create_token(&self, kind: ContainerKind, token: &Token) {
        let mut inner = self.lock();
        inner
            .visuals
            .entry(kind)
            .or_default()
            .push(token.id.clone());
        inner.calls.push(RenderCall::Create {
            kind,
            token: token.clone(),
        });
    }

    fn mark_completed(&self, kind: ContainerKind, id: &str) {
        self.record(RenderCall::MarkCompleted {
            kind,
            id: id.to_string(),
        });
    }

    fn remove_token(&self, kind: ContainerKind, id: &str) {
        let mut inner = self.lock();
        if let Some(list) = inner.visuals.get_mut(&kind) {
            list.retain(|v| v != id);
        }
        inner.calls.push(RenderCall::Remove {
            kind,
            id: id.to_string(),
        });
    }

    fn clear(&self) {
        let mut inner = self.lock();
        inner.visuals.clear();
        inner.calls.push(RenderCall::Clear);
    }

    fn has_anchor(&self, kind: ContainerKind) -> bool {
        !self.lock().missing_anchors.contains(&kind)
    }

    fn locate(&self, kind: ContainerKind, id: &str) -> Option<Rect> {
        let inner = self.lock();
        let row = inner.visuals.get(&kind)?.iter().position(|v| v == id)?;
        Some(Rect::new(kind.index() as u16 * 20, row as u16, 20, 1))
    }

    fn reserve_slot(&self, kind: ContainerKind, _token: &Token) -> Option<Rect> {
        let inner = self.lock();
        if inner.missing_anchors.contains(&kind) {
            return None;
        }
        let row = inner.visuals.get(&kind).map(Vec::len).unwrap_or(0);
        Some(Rect::new(kind.index() as u16 * 20, row as u16, 20, 1))
    }

    fn animate_transfer(&self, flight: &Flight) {
        self.record(RenderCall::Transfer {
            id: flight.token.id.clone(),
            source: flight.source,
            destination: flight.destination,
        });
    }

    fn draw_connection(&self, marker: &Token, from: Engine, to: Engine) {
        self.record(RenderCall::Connection {
            id: marker.id.clone(),
            from,
            to,
        });
    }

    fn discard_connection(&self, id: &str) {
        self.record(RenderCall::DiscardConnection { id: id.to_string() });
    }

    fn step_started(&self, index: usize, _total: usize, _step: &Step) {
        self.record(RenderCall::StepStarted { index });
    }

    fn pause_changed(&self, paused: bool) {
        self.record(RenderCall::PauseChanged { paused });
    }

    fn run_changed(&self, scenario_id: &str, running: bool) {
        self.record(RenderCall::RunChanged {
            scenario_id: scenario_id.to_string(),
            running,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn recording_tracks_visual_order() {
        let renderer = RecordingRenderer::new();
        let a = Token::new("a", "A", Category::Sync);
        let b = Token::new("b", "B", Category::Sync);
        renderer.create_token(ContainerKind::CallStack, &a);
        renderer.create_token(ContainerKind::CallStack, &b);

        assert_eq!(renderer.visible(ContainerKind::CallStack), vec!["a", "b"]);
        assert_eq!(renderer.locate(ContainerKind::CallStack, "b").unwrap().y, 1);

        renderer.remove_token(ContainerKind::CallStack, "a");
        assert_eq!(renderer.visible(ContainerKind::CallStack), vec!["b"]);
    }

    #[test]
    fn reserve_slot_points_past_last_visual() {
        let renderer = RecordingRenderer::new();
        let a = Token::new("a", "A", Category::Micro);
        renderer.create_token(ContainerKind::MicrotaskQueue, &a);
        let slot = renderer
            .reserve_slot(ContainerKind::MicrotaskQueue, &a)
            .unwrap();
        assert_eq!(slot.y, 1);
    }

    #[test]
    fn missing_anchor_yields_no_slot() {
        let renderer = RecordingRenderer::new().without_anchor(ContainerKind::WorkerCallStack);
        let token = Token::new("w", "w", Category::Worker);
        assert!(renderer
            .reserve_slot(ContainerKind::WorkerCallStack, &token)
            .is_none());
        assert!(renderer.reserve_slot(ContainerKind::CallStack, &token).is_some());
    }

    #[test]
    fn forget_hides_token_from_locate() {
        let renderer = RecordingRenderer::new();
        renderer.create_token(ContainerKind::Heap, &Token::heap("x"));
        renderer.forget(ContainerKind::Heap, "heap-x");
        assert!(renderer.locate(ContainerKind::Heap, "heap-x").is_none());
    }
}
