//! Windowed viewer.
//!
//! winit owns the window and event loop, pixels owns the framebuffer the
//! rendered image is copied into, and egui draws the selection rubber band
//! and failure text on top.

pub mod app;
pub mod commands;
pub mod errors;
pub mod events;
