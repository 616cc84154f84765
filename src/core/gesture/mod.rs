//! Press-drag-release zoom gesture.

pub mod controller;

pub use controller::{GestureController, GestureState};
