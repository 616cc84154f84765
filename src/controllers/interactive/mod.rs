//! UI-context side of the viewer.
//!
//! The display surface forwards pointer and resize events into an
//! [`InteractiveController`], which turns them into render requests for the
//! single-flight [`RenderScheduler`]. Finished renders come back through a
//! channel and are applied to a [`DisplaySurface`] when the UI calls
//! [`InteractiveController::pump`].
//!
//! # Architecture
//!
//! - **Input**: pointer and resize events in surface pixel coordinates
//! - **Output**: the `DisplaySurface` port (image ready, fatal failure)
//! - **Core**: gesture state machine and render jobs from `core/`

mod controller;
pub mod ports;
mod scheduler;
mod view_state;

pub use controller::{InteractiveController, ViewerStatus};
pub use ports::display::DisplaySurface;
pub use scheduler::{Delivery, RenderScheduler, SchedulerAction};
pub use view_state::ViewState;
