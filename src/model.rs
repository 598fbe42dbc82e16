//! Core data model: containers, tokens and scripted steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One of the five fixed regions whose contents the visualizer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    CallStack,
    Heap,
    MicrotaskQueue,
    MacrotaskQueue,
    WorkerCallStack,
}

impl ContainerKind {
    /// All containers in display order
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::CallStack,
        ContainerKind::Heap,
        ContainerKind::MicrotaskQueue,
        ContainerKind::MacrotaskQueue,
        ContainerKind::WorkerCallStack,
    ];

    /// Human readable name used in panel titles and transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            ContainerKind::CallStack => "Call Stack",
            ContainerKind::Heap => "Heap",
            ContainerKind::MicrotaskQueue => "Microtask Queue",
            ContainerKind::MacrotaskQueue => "Macrotask Queue",
            ContainerKind::WorkerCallStack => "Worker Call Stack",
        }
    }

    /// Call-stack-like containers mark exiting frames completed before
    /// removing them.
    pub fn is_call_stack(&self) -> bool {
        matches!(
            self,
            ContainerKind::CallStack | ContainerKind::WorkerCallStack
        )
    }

    /// Engine region the container is drawn inside.
    pub fn engine(&self) -> Engine {
        match self {
            ContainerKind::WorkerCallStack => Engine::Worker,
            _ => Engine::Main,
        }
    }

    /// Stable index into per-container arrays.
    pub fn index(&self) -> usize {
        match self {
            ContainerKind::CallStack => 0,
            ContainerKind::Heap => 1,
            ContainerKind::MicrotaskQueue => 2,
            ContainerKind::MacrotaskQueue => 3,
            ContainerKind::WorkerCallStack => 4,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two execution contexts a connection marker can travel between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Main,
    Worker,
}

impl Engine {
    pub fn label(&self) -> &'static str {
        match self {
            Engine::Main => "Main Thread",
            Engine::Worker => "Worker Thread",
        }
    }
}

/// Kind of work a token represents. Drives styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sync,
    Micro,
    Macro,
    Worker,
    Connection,
    /// Seeded heap entries
    Heap,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sync => "sync",
            Category::Micro => "micro",
            Category::Macro => "macro",
            Category::Worker => "worker",
            Category::Connection => "connection",
            Category::Heap => "heap",
        }
    }
}

/// A visual/logical unit of scripted execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub label: String,
    pub category: Category,
}

impl Token {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
        }
    }

    /// Heap entries are keyed by their label.
    pub fn heap(label: &str) -> Self {
        Self::new(format!("heap-{}", label), label, Category::Heap)
    }
}

/// One scripted instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub token_id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ContainerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<ContainerKind>,
    pub category: Category,
}

/// The four shapes a well-formed step can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepShape {
    Enter {
        destination: ContainerKind,
    },
    Exit {
        source: ContainerKind,
    },
    Transfer {
        source: ContainerKind,
        destination: ContainerKind,
    },
    Connection {
        from: Engine,
        to: Engine,
    },
}

impl Step {
    pub fn enter(id: &str, label: &str, destination: ContainerKind, category: Category) -> Self {
        Self {
            token_id: id.to_string(),
            label: label.to_string(),
            source: None,
            destination: Some(destination),
            category,
        }
    }

    pub fn exit(id: &str, label: &str, source: ContainerKind, category: Category) -> Self {
        Self {
            token_id: id.to_string(),
            label: label.to_string(),
            source: Some(source),
            destination: None,
            category,
        }
    }

    pub fn transfer(
        id: &str,
        label: &str,
        source: ContainerKind,
        destination: ContainerKind,
        category: Category,
    ) -> Self {
        Self {
            token_id: id.to_string(),
            label: label.to_string(),
            source: Some(source),
            destination: Some(destination),
            category,
        }
    }

    pub fn connection(id: &str, label: &str, from: ContainerKind, to: ContainerKind) -> Self {
        Self {
            token_id: id.to_string(),
            label: label.to_string(),
            source: Some(from),
            destination: Some(to),
            category: Category::Connection,
        }
    }

    /// Classify the step. Connection category wins over the endpoint shape.
    ///
    /// `index` is only used to label the error.
    pub fn shape(&self, index: usize) -> Result<StepShape> {
        if self.category == Category::Connection {
            return match (self.source, self.destination) {
                (Some(from), Some(to)) => Ok(StepShape::Connection {
                    from: from.engine(),
                    to: to.engine(),
                }),
                _ => Err(EngineError::MalformedStep {
                    index,
                    reason: format!(
                        "connection '{}' needs both a source and a destination",
                        self.token_id
                    ),
                }),
            };
        }

        match (self.source, self.destination) {
            (None, Some(destination)) => Ok(StepShape::Enter { destination }),
            (Some(source), None) => Ok(StepShape::Exit { source }),
            (Some(source), Some(destination)) => Ok(StepShape::Transfer {
                source,
                destination,
            }),
            (None, None) => Err(EngineError::MalformedStep {
                index,
                reason: format!("step '{}' has neither source nor destination", self.token_id),
            }),
        }
    }

    /// Token this step creates or moves.
    pub fn token(&self) -> Token {
        Token::new(&self.token_id, &self.label, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_classifies_enter_exit_transfer() {
        let enter = Step::enter("main", "main()", ContainerKind::CallStack, Category::Sync);
        let exit = Step::exit("main", "main()", ContainerKind::CallStack, Category::Sync);
        let transfer = Step::transfer(
            "cb",
            "cb",
            ContainerKind::MacrotaskQueue,
            ContainerKind::CallStack,
            Category::Macro,
        );

        assert_eq!(
            enter.shape(0).unwrap(),
            StepShape::Enter {
                destination: ContainerKind::CallStack
            }
        );
        assert_eq!(
            exit.shape(1).unwrap(),
            StepShape::Exit {
                source: ContainerKind::CallStack
            }
        );
        assert_eq!(
            transfer.shape(2).unwrap(),
            StepShape::Transfer {
                source: ContainerKind::MacrotaskQueue,
                destination: ContainerKind::CallStack
            }
        );
    }

    #[test]
    fn connection_category_overrides_endpoints() {
        let step = Step::connection(
            "msg",
            "Worker Connection",
            ContainerKind::CallStack,
            ContainerKind::WorkerCallStack,
        );
        assert_eq!(
            step.shape(0).unwrap(),
            StepShape::Connection {
                from: Engine::Main,
                to: Engine::Worker
            }
        );
    }

    #[test]
    fn connection_without_endpoint_is_malformed() {
        let mut step = Step::connection(
            "msg",
            "Worker Connection",
            ContainerKind::CallStack,
            ContainerKind::WorkerCallStack,
        );
        step.destination = None;
        let err = step.shape(7).unwrap_err();
        assert!(matches!(err, EngineError::MalformedStep { index: 7, .. }));
    }

    #[test]
    fn shapeless_step_is_malformed() {
        let mut step = Step::enter("x", "x", ContainerKind::Heap, Category::Sync);
        step.destination = None;
        assert!(step.shape(0).is_err());
    }

    #[test]
    fn call_stack_kinds() {
        assert!(ContainerKind::CallStack.is_call_stack());
        assert!(ContainerKind::WorkerCallStack.is_call_stack());
        assert!(!ContainerKind::MicrotaskQueue.is_call_stack());
        assert!(!ContainerKind::Heap.is_call_stack());
    }

    #[test]
    fn only_worker_call_stack_lives_in_worker_engine() {
        for kind in ContainerKind::ALL {
            let expected = if kind == ContainerKind::WorkerCallStack {
                Engine::Worker
            } else {
                Engine::Main
            };
            assert_eq!(kind.engine(), expected);
        }
    }

    #[test]
    fn indices_match_display_order() {
        for (i, kind) in ContainerKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn heap_token_id_is_prefixed() {
        let token = Token::heap("main()");
        assert_eq!(token.id, "heap-main()");
        assert_eq!(token.label, "main()");
        assert_eq!(token.category, Category::Heap);
    }

    #[test]
    fn step_serializes_with_snake_case_containers() {
        let step = Step::transfer(
            "cb",
            "callback",
            ContainerKind::MicrotaskQueue,
            ContainerKind::CallStack,
            Category::Micro,
        );
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"microtask_queue\""));
        assert!(json.contains("\"call_stack\""));
        assert!(json.contains("\"micro\""));
    }

    #[test]
    fn enter_step_omits_missing_source() {
        let step = Step::enter("a", "a", ContainerKind::CallStack, Category::Sync);
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("source"));
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source, None);
    }
}
