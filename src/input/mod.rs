//! Input adapters that feed window-system events into the interactive controller.

pub mod gui;
