//! Static well-formedness check for scripts.
//!
//! Replays ownership without any timing: every Exit or Transfer must name a
//! token that an earlier step put into that exact container, and no id may
//! be entered twice while it is still live.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::Scenario;
use crate::model::{ContainerKind, StepShape};

/// One problem found in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptIssue {
    pub index: usize,
    pub token_id: String,
    pub message: String,
}

impl fmt::Display for ScriptIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step #{} ({}): {}", self.index, self.token_id, self.message)
    }
}

/// Check a scenario. An empty result means the script is well-formed.
pub fn validate(scenario: &Scenario) -> Vec<ScriptIssue> {
    let mut issues = Vec::new();
    let mut live: HashMap<&str, ContainerKind> = HashMap::new();

    let mut heap = HashSet::new();
    for label in &scenario.initial_heap {
        if !heap.insert(label.as_str()) {
            issues.push(ScriptIssue {
                index: 0,
                token_id: format!("heap-{}", label),
                message: "heap label appears more than once".to_string(),
            });
        }
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        let id = step.token_id.as_str();
        let mut issue = |message: String| {
            issues.push(ScriptIssue {
                index,
                token_id: id.to_string(),
                message,
            })
        };

        let shape = match step.shape(index) {
            Ok(shape) => shape,
            Err(err) => {
                issue(err.to_string());
                continue;
            }
        };

        match shape {
            StepShape::Enter { destination } => {
                if let Some(holder) = live.get(id) {
                    issue(format!("entered again while still in {}", holder));
                } else {
                    live.insert(id, destination);
                }
            }
            StepShape::Exit { source } => match live.get(id) {
                Some(holder) if *holder == source => {
                    live.remove(id);
                }
                Some(holder) => issue(format!("exits {} but is in {}", source, holder)),
                None => issue(format!("exits {} without a prior enter", source)),
            },
            StepShape::Transfer {
                source,
                destination,
            } => match live.get(id) {
                Some(holder) if *holder == source => {
                    live.insert(id, destination);
                }
                Some(holder) => issue(format!("moves from {} but is in {}", source, holder)),
                None => issue(format!("moves from {} without a prior enter", source)),
            },
            StepShape::Connection { .. } => {}
        }
    }

    issues
}
