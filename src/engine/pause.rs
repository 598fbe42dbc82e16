//! Cooperative pause gate.
//!
//! The playback loop calls [`PauseController::checkpoint`] once before every
//! step. While paused the caller blocks on a one-shot channel whose sender
//! is parked in a single waiter slot; the next resume fires it exactly once.

use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{EngineError, Result};

#[derive(Debug, Default)]
struct Gate {
    paused: bool,
    waiter: Option<Sender<()>>,
}

#[derive(Debug, Default)]
pub struct PauseController {
    gate: Mutex<Gate>,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the paused flag and return the new value.
    ///
    /// Resuming wakes the registered waiter, if any.
    pub fn toggle(&self) -> bool {
        let mut gate = self.lock();
        gate.paused = !gate.paused;
        if !gate.paused {
            if let Some(waiter) = gate.waiter.take() {
                debug!("resuming suspended playback");
                // The waiter only disappears if its thread is gone
                let _ = waiter.send(());
            }
        }
        gate.paused
    }

    /// Block while paused.
    ///
    /// Returns immediately when not paused. At most one flow may be
    /// suspended at a time; a second caller fails with
    /// [`EngineError::CheckpointReentered`].
    pub fn checkpoint(&self) -> Result<()> {
        let resumed = {
            let mut gate = self.lock();
            if !gate.paused {
                return Ok(());
            }
            if gate.waiter.is_some() {
                return Err(EngineError::CheckpointReentered);
            }
            let (tx, rx) = mpsc::channel();
            gate.waiter = Some(tx);
            rx
        };

        debug!("playback suspended at checkpoint");
        resumed.recv().map_err(|_| EngineError::PauseGateClosed)
    }

    /// Clear the flag at the start of a run. A parked waiter is released.
    pub fn reset(&self) {
        let mut gate = self.lock();
        gate.paused = false;
        if let Some(waiter) = gate.waiter.take() {
            let _ = waiter.send(());
        }
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Whether a flow is currently suspended at the checkpoint.
    pub fn has_waiter(&self) -> bool {
        self.lock().waiter.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(|e| e.into_inner())
    }
}
