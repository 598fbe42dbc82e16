//! Applies one scripted step to the container store.
//!
//! Each step shape has its own protocol:
//!
//! | Shape       | Store effect                                  | Wait           |
//! |-------------|-----------------------------------------------|----------------|
//! | Enter       | append                                        | step delay     |
//! | Exit (stack)| mark completed, then remove after the delay   | step delay     |
//! | Exit (queue)| remove                                        | step delay     |
//! | Transfer    | detach, animate, land in destination          | transfer time  |
//! | Connection  | none                                          | step delay     |
//!
//! `execute` returns only after the step's timing window has elapsed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::clock::Clock;
use crate::engine::renderer::{Flight, Renderer};
use crate::engine::store::ContainerStore;
use crate::error::{EngineError, Result};
use crate::model::{ContainerKind, Engine, Step, StepShape};

/// Fixed timing windows. Not changeable during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause after every enter, exit and connection
    pub step_delay: Duration,
    /// Length of a transfer animation
    pub transfer: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(600),
            transfer: Duration::from_millis(600),
        }
    }
}

/// What happened to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// A state error made the step a no-op
    Skipped(EngineError),
}

pub struct StepExecutor {
    store: Arc<Mutex<ContainerStore>>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
    timing: Timing,
}

impl StepExecutor {
    pub fn new(
        store: Arc<Mutex<ContainerStore>>,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
        timing: Timing,
    ) -> Self {
        Self {
            store,
            renderer,
            clock,
            timing,
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Apply `step` (the `index`th of its scenario).
    ///
    /// State errors are logged and reported as [`StepOutcome::Skipped`];
    /// configuration errors are returned.
    pub fn execute(&self, index: usize, step: &Step) -> Result<StepOutcome> {
        let shape = step.shape(index)?;
        debug!(index, id = %step.token_id, ?shape, "executing step");

        let result = match shape {
            StepShape::Enter { destination } => self.enter(step, destination),
            StepShape::Exit { source } => self.exit(step, source),
            StepShape::Transfer {
                source,
                destination,
            } => self.transfer(step, source, destination),
            StepShape::Connection { from, to } => self.connection(step, from, to),
        };

        match result {
            Ok(()) => Ok(StepOutcome::Applied),
            Err(err) if err.is_recoverable() => {
                warn!(index, error = %err, "step skipped");
                Ok(StepOutcome::Skipped(err))
            }
            Err(err) => Err(err),
        }
    }

    fn enter(&self, step: &Step, destination: ContainerKind) -> Result<()> {
        self.require_anchor(destination)?;
        let appended = self.store().append(destination, step.token());
        self.clock.sleep(self.timing.step_delay);
        appended
    }

    fn exit(&self, step: &Step, source: ContainerKind) -> Result<()> {
        self.require_anchor(source)?;
        let id = step.token_id.as_str();

        if source.is_call_stack() {
            let marked = self.store().mark_completed(source, id);
            self.clock.sleep(self.timing.step_delay);
            marked?;
            self.store().remove_by_id(source, id).map(|_| ())
        } else {
            let removed = self.store().remove_by_id(source, id).map(|_| ());
            self.clock.sleep(self.timing.step_delay);
            removed
        }
    }

    fn transfer(&self, step: &Step, source: ContainerKind, destination: ContainerKind) -> Result<()> {
        let id = step.token_id.as_str();

        let from = {
            let store = self.store();
            if !store.entries(source).iter().any(|e| e.token.id == id) {
                return Err(EngineError::TokenNotFound {
                    id: id.to_string(),
                    container: source,
                });
            }
            self.renderer
                .locate(source, id)
                .ok_or_else(|| EngineError::TokenNotFound {
                    id: id.to_string(),
                    container: source,
                })?
        };

        if !self.renderer.has_anchor(destination) {
            return Err(EngineError::MissingAnchor {
                container: destination,
            });
        }
        let to = self
            .renderer
            .reserve_slot(destination, &step.token())
            .ok_or(EngineError::MissingAnchor {
                container: destination,
            })?;

        let token = self.store().detach(source, id)?;
        self.renderer.animate_transfer(&Flight {
            token,
            source,
            destination,
            from,
            to,
            duration: self.timing.transfer,
        });
        self.clock.sleep(self.timing.transfer);

        // Ownership changes only once the animation is over
        self.store().land(id, destination)
    }

    fn connection(&self, step: &Step, from: Engine, to: Engine) -> Result<()> {
        for kind in [step.source, step.destination].into_iter().flatten() {
            self.require_anchor(kind)?;
        }
        let marker = step.token();
        self.renderer.draw_connection(&marker, from, to);
        self.clock.sleep(self.timing.step_delay);
        self.renderer.discard_connection(&marker.id);
        Ok(())
    }

    fn require_anchor(&self, kind: ContainerKind) -> Result<()> {
        if self.renderer.has_anchor(kind) {
            Ok(())
        } else {
            Err(EngineError::MissingAnchor { container: kind })
        }
    }

    fn store(&self) -> MutexGuard<'_, ContainerStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}
