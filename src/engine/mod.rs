//! Scenario playback engine.
//!
//! Leaves first:
//! - `store`: ordered token lists per container
//! - `pause`: the cooperative suspension gate
//! - `clock`: time source for fixed waits
//! - `renderer`: presentation interface the engine drives
//! - `executor`: applies one step, waits out its timing window

pub mod clock;
pub mod executor;
pub mod pause;
pub mod renderer;
pub mod store;

pub use clock::{Clock, InstantClock, SystemClock};
pub use executor::{StepExecutor, StepOutcome, Timing};
pub use pause::PauseController;
pub use renderer::{Flight, NullRenderer, RecordingRenderer, RenderCall, Renderer};
pub use store::{ContainerStore, Entry, Snapshot};
