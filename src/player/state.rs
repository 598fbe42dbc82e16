//! Session status shared between the playback thread and its hosts.

/// Snapshot of where playback currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    /// Scenario of the current or most recent run
    pub scenario_id: Option<String>,
    /// Index of the next step to execute
    pub step_index: usize,
    /// Number of steps in the scenario
    pub total_steps: usize,
    /// Whether a run holds the run slot
    pub running: bool,
    /// Whether the pause gate is closed
    pub paused: bool,
}

impl SessionStatus {
    /// Fraction of steps executed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            (self.step_index as f64 / self.total_steps as f64).min(1.0)
        }
    }

    /// Short word for the status bar.
    pub fn phase_label(&self) -> &'static str {
        match (self.running, self.paused) {
            (false, _) => "Idle",
            (true, false) => "Running",
            (true, true) => "Paused",
        }
    }
}

/// How a finished run went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub scenario_id: String,
    /// Steps executed, including skipped ones
    pub steps: usize,
    /// Steps that were no-ops because of a state error
    pub skipped: usize,
}

/// Result of asking the player to run something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Another run held the slot; nothing happened
    Rejected,
}

impl RunOutcome {
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            RunOutcome::Rejected => None,
        }
    }
}
