//! Scenario scripts and the registry that serves them.
//!
//! A scenario is static data: an initial heap plus an ordered list of steps,
//! authored to replay one scheduling pattern. The registry performs no
//! runtime checks beyond existence for built-ins; externally loaded scripts
//! are validated before they are accepted.

mod builtin;
mod validate;

pub use validate::{validate, ScriptIssue};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{ContainerKind, Step};

/// Source code displayed beside a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    Single(String),
    /// Main-thread and worker code shown side by side
    Split { main: String, worker: String },
}

/// A named, immutable script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub initial_heap: Vec<String>,
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<Listing>,
}

impl Scenario {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether any step touches the worker call stack.
    pub fn uses_worker(&self) -> bool {
        self.steps.iter().any(|s| {
            s.source == Some(ContainerKind::WorkerCallStack)
                || s.destination == Some(ContainerKind::WorkerCallStack)
        })
    }

    /// Title for tabs, falling back to the id.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Ordered catalog of scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    /// Registry holding the six built-in scenarios.
    pub fn builtin() -> Self {
        let registry = Self {
            scenarios: builtin::all(),
        };
        debug_assert!(
            registry.scenarios.iter().all(|s| validate(s).is_empty()),
            "built-in scenarios must be well-formed"
        );
        registry
    }

    pub fn empty() -> Self {
        Self {
            scenarios: Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| EngineError::UnknownScenario { id: id.to_string() })
    }

    /// Add a validated scenario, replacing any existing one with the same id.
    pub fn register(&mut self, scenario: Scenario) -> Result<()> {
        let issues = validate(&scenario);
        if !issues.is_empty() {
            return Err(EngineError::InvalidScript {
                id: scenario.id,
                issues: issues.iter().map(ToString::to_string).collect(),
            });
        }
        match self.scenarios.iter_mut().find(|s| s.id == scenario.id) {
            Some(existing) => *existing = scenario,
            None => self.scenarios.push(scenario),
        }
        Ok(())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Position of `id` in tab order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.scenarios.iter().position(|s| s.id == id)
    }
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
