//! One render at a time, executed by an external engine process off the UI thread.

pub mod job;
pub mod outcome;
pub mod ports;

pub use job::{OutcomeSender, RenderJob};
pub use outcome::{RenderError, RenderFailure, RenderOutcome};
pub use ports::engine::{EngineExit, EngineProcess, ProcessWait, RenderEngine};
pub use ports::waker::UiWaker;
