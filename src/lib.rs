//! loopviz - event loop visualizer
//!
//! Replays scripted scenarios of how a single-threaded runtime schedules
//! work across its call stack, heap, task queues and a worker thread.
//!
//! - `scenario`: the scripts and their registry
//! - `engine`: container store, pause gate and step executor
//! - `player`: the control surface hosts drive (run, pause, reset)
//! - `tui`: the interactive board

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod player;
pub mod scenario;
pub mod tui;

pub use config::Config;
pub use error::{EngineError, ErrorKind};
pub use model::{Category, ContainerKind, Engine, Step, Token};
pub use player::{Player, RunOutcome, RunSummary};
pub use scenario::{Scenario, ScenarioRegistry};
