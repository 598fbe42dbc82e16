//! Engine error taxonomy.
//!
//! Every failure the playback engine can raise falls into one of three
//! kinds. The kind decides what happens to a run:
//!
//! - [`ErrorKind::Config`]: static integrity failure (unknown scenario,
//!   missing render anchor, malformed script). Aborts the run.
//! - [`ErrorKind::State`]: a referenced token is absent or duplicated.
//!   Logged and swallowed; the step becomes a no-op.
//! - [`ErrorKind::Concurrency`]: the pause gate was misused. Fatal when it
//!   originates inside the step loop.

use crate::model::ContainerKind;

/// Broad classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    State,
    Concurrency,
}

/// Errors raised by the container store, pause gate, executor and registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown scenario: {id}")]
    UnknownScenario { id: String },

    #[error("No render anchor for container '{container}'")]
    MissingAnchor { container: ContainerKind },

    #[error("Malformed step #{index}: {reason}")]
    MalformedStep { index: usize, reason: String },

    #[error("Script '{id}' is not well-formed: {}", issues.join("; "))]
    InvalidScript { id: String, issues: Vec<String> },

    #[error("Token '{id}' already present in {container}")]
    DuplicateToken { id: String, container: ContainerKind },

    #[error("Token '{id}' not found in {container}")]
    TokenNotFound { id: String, container: ContainerKind },

    #[error("Pause checkpoint entered while another flow is already suspended")]
    CheckpointReentered,

    #[error("Pause gate was dropped before the suspended flow was resumed")]
    PauseGateClosed,
}

impl EngineError {
    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownScenario { .. }
            | Self::MissingAnchor { .. }
            | Self::MalformedStep { .. }
            | Self::InvalidScript { .. } => ErrorKind::Config,
            Self::DuplicateToken { .. } | Self::TokenNotFound { .. } => ErrorKind::State,
            Self::CheckpointReentered | Self::PauseGateClosed => ErrorKind::Concurrency,
        }
    }

    /// Only state errors may be swallowed by the step loop.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::State
    }
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
