//! Scenario player: the control surface hosts drive.
//!
//! A [`Player`] owns one container store, one pause gate and one run slot.
//! At most one run holds the slot at a time; the three controls are no-ops
//! whenever their guard condition does not hold:
//!
//! - `run` / `spawn`: rejected while a run is active
//! - `reset`: rejected while a run is active
//! - `toggle_pause`: ignored while idle
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use loopviz::engine::{NullRenderer, SystemClock, Timing};
//! use loopviz::player::{Player, RunOutcome};
//! use loopviz::scenario::ScenarioRegistry;
//!
//! let player = Player::new(
//!     Arc::new(ScenarioRegistry::builtin()),
//!     Arc::new(NullRenderer),
//!     Arc::new(SystemClock::default()),
//!     Timing::default(),
//! );
//! match player.run("timeout").unwrap() {
//!     RunOutcome::Completed(summary) => println!("{} steps", summary.steps),
//!     RunOutcome::Rejected => println!("already running"),
//! }
//! ```

mod console;
mod session;
pub mod state;

pub use console::ConsoleRenderer;
pub use session::PlaybackSession;
pub use state::{RunOutcome, RunSummary, SessionStatus};

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::engine::{Clock, Renderer, Snapshot, StepExecutor, Timing};
use crate::error::Result;
use crate::model::{ContainerKind, Token};
use crate::scenario::ScenarioRegistry;
use session::{RunGuard, Shared};

/// Handle to a run in the background.
pub type RunHandle = JoinHandle<Result<RunSummary>>;

#[derive(Clone)]
pub struct Player {
    registry: Arc<ScenarioRegistry>,
    shared: Arc<Shared>,
    executor: Arc<StepExecutor>,
}

impl Player {
    pub fn new(
        registry: Arc<ScenarioRegistry>,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
        timing: Timing,
    ) -> Self {
        let shared = Arc::new(Shared::new(renderer.clone()));
        let executor = Arc::new(StepExecutor::new(
            shared.store.clone(),
            renderer,
            clock,
            timing,
        ));
        Self {
            registry,
            shared,
            executor,
        }
    }

    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// Run a scenario to completion on the calling thread.
    pub fn run(&self, scenario_id: &str) -> Result<RunOutcome> {
        let Some(mut guard) = RunGuard::acquire(&self.shared) else {
            debug!(scenario = scenario_id, "run rejected: another run is active");
            return Ok(RunOutcome::Rejected);
        };
        guard.announce(self.registry.get(scenario_id)?);
        self.drive(guard, scenario_id).map(RunOutcome::Completed)
    }

    /// Run a scenario on a background thread.
    ///
    /// Returns `Ok(None)` when another run is active. An unknown id fails
    /// before any thread is started.
    pub fn spawn(&self, scenario_id: &str) -> Result<Option<RunHandle>> {
        let Some(mut guard) = RunGuard::acquire(&self.shared) else {
            debug!(scenario = scenario_id, "run rejected: another run is active");
            return Ok(None);
        };
        // Running starts here, not when the thread gets scheduled
        guard.announce(self.registry.get(scenario_id)?);

        let player = self.clone();
        let id = scenario_id.to_string();
        let handle = thread::Builder::new()
            .name("loopviz-playback".to_string())
            .spawn(move || player.drive(guard, &id));

        match handle {
            Ok(handle) => Ok(Some(handle)),
            Err(err) => {
                error!(error = %err, "failed to start playback thread");
                Ok(None)
            }
        }
    }

    /// Empty every container. Only allowed while idle.
    pub fn reset(&self) -> bool {
        let Some(_guard) = RunGuard::acquire(&self.shared) else {
            debug!("reset rejected: a run is active");
            return false;
        };
        self.shared.store().reset();
        true
    }

    /// Flip pause while running. Returns the new paused state, or `None`
    /// when idle.
    ///
    /// A run counts as running from the moment `run`/`spawn` accepts it;
    /// the slot held briefly by `reset` does not.
    pub fn toggle_pause(&self) -> Option<bool> {
        // Held across the toggle so a finishing run cannot interleave
        let mut status = self.shared.status();
        if !status.running {
            return None;
        }
        let paused = self.shared.pause.toggle();
        status.paused = paused;
        self.shared.renderer.pause_changed(paused);
        Some(paused)
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_busy()
    }

    pub fn is_paused(&self) -> bool {
        self.shared.pause.is_paused()
    }

    /// Whether the playback flow is parked at the pause checkpoint.
    pub fn is_suspended(&self) -> bool {
        self.shared.pause.has_waiter()
    }

    /// Fraction of the current run's steps executed.
    pub fn progress(&self) -> f64 {
        self.status().fraction()
    }

    pub fn status(&self) -> SessionStatus {
        let mut status = self.shared.status().clone();
        status.paused = status.running && self.shared.pause.is_paused();
        status
    }

    /// Logical contents of one container.
    pub fn contents(&self, kind: ContainerKind) -> Vec<Token> {
        self.shared.store().tokens(kind)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.store().snapshot()
    }

    fn drive(&self, guard: RunGuard, scenario_id: &str) -> Result<RunSummary> {
        let scenario = self.registry.get(scenario_id)?;
        info!(scenario = scenario_id, steps = scenario.steps.len(), "run started");

        let session = PlaybackSession::start(&self.shared, scenario);
        let result = session.run(&self.executor);

        match &result {
            Ok(summary) => info!(
                scenario = scenario_id,
                steps = summary.steps,
                skipped = summary.skipped,
                "run finished"
            ),
            Err(err) => error!(scenario = scenario_id, error = %err, "run aborted"),
        }
        drop(guard);
        result
    }
}
