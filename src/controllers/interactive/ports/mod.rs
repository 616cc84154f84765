//! Port definitions for the interactive controller.
//!
//! Contains trait definitions that define interfaces between the controller
//! and the display surface it drives.

pub mod display;
