//! One full run of a scenario, and the slot that keeps runs exclusive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use super::state::{RunSummary, SessionStatus};
use crate::engine::{ContainerStore, PauseController, Renderer, StepExecutor, StepOutcome};
use crate::error::Result;
use crate::scenario::Scenario;

/// State shared by every handle to one player.
pub(crate) struct Shared {
    pub(crate) store: Arc<Mutex<ContainerStore>>,
    pub(crate) pause: PauseController,
    pub(crate) renderer: Arc<dyn Renderer>,
    busy: AtomicBool,
    status: Mutex<SessionStatus>,
}

impl Shared {
    pub(crate) fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            store: Arc::new(Mutex::new(ContainerStore::new(renderer.clone()))),
            pause: PauseController::new(),
            renderer,
            busy: AtomicBool::new(false),
            status: Mutex::new(SessionStatus::default()),
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn store(&self) -> MutexGuard<'_, ContainerStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn status(&self) -> MutexGuard<'_, SessionStatus> {
        self.status.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exclusive hold on the run slot. Released on drop, including unwinding.
pub(crate) struct RunGuard {
    shared: Arc<Shared>,
    announced: Option<String>,
}

impl RunGuard {
    /// Take the slot, or `None` if a run already holds it.
    pub(crate) fn acquire(shared: &Arc<Shared>) -> Option<Self> {
        shared
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        // Every hold starts with the gate open
        shared.pause.reset();
        Some(Self {
            shared: shared.clone(),
            announced: None,
        })
    }

    /// Enter Running for `scenario`.
    ///
    /// From here on `toggle_pause` is honored, even before the playback
    /// loop reaches its first checkpoint.
    pub(crate) fn announce(&mut self, scenario: &Scenario) {
        *self.shared.status() = SessionStatus {
            scenario_id: Some(scenario.id.clone()),
            step_index: 0,
            total_steps: scenario.steps.len(),
            running: true,
            paused: false,
        };
        self.announced = Some(scenario.id.clone());
        self.shared.renderer.run_changed(&scenario.id, true);
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Some(id) = self.announced.take() {
            {
                let mut status = self.shared.status();
                status.running = false;
                status.paused = false;
            }
            // After `running` is cleared no toggle can close the gate again
            self.shared.pause.reset();
            self.shared.renderer.run_changed(&id, false);
        }
        self.shared.busy.store(false, Ordering::Release);
    }
}

/// A run in progress: Idle -> Running -> Idle.
pub struct PlaybackSession<'a> {
    shared: &'a Shared,
    scenario: &'a Scenario,
    step_index: usize,
    skipped: usize,
}

impl<'a> PlaybackSession<'a> {
    /// Clear the store and seed the heap of an announced run.
    /// Leaves the pause gate as the announcing caller left it.
    pub(crate) fn start(shared: &'a Shared, scenario: &'a Scenario) -> Self {
        let mut store = shared.store();
        store.reset();
        if let Err(err) = store.seed_heap(&scenario.initial_heap) {
            warn!(scenario = %scenario.id, error = %err, "heap seeding incomplete");
        }
        drop(store);

        Self {
            shared,
            scenario,
            step_index: 0,
            skipped: 0,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Execute every remaining step in order.
    ///
    /// Each step is preceded by the pause checkpoint, so a pause always
    /// lands between two whole steps.
    pub fn run(mut self, executor: &StepExecutor) -> Result<RunSummary> {
        let total = self.scenario.steps.len();
        while self.step_index < total {
            self.shared.pause.checkpoint()?;

            let step = &self.scenario.steps[self.step_index];
            self.shared
                .renderer
                .step_started(self.step_index, total, step);
            if let StepOutcome::Skipped(_) = executor.execute(self.step_index, step)? {
                self.skipped += 1;
            }

            self.step_index += 1;
            self.shared.status().step_index = self.step_index;
            debug!(scenario = %self.scenario.id, step = self.step_index, total, "step done");
        }

        Ok(RunSummary {
            scenario_id: self.scenario.id.clone(),
            steps: self.step_index,
            skipped: self.skipped,
        })
    }
}
