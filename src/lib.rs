pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod logging;
#[cfg(feature = "gui")]
pub mod presenters;
pub mod storage;
#[cfg(test)]
mod test_support;

pub use adapters::process_engine::ProcessEngine;
pub use config::{ConfigError, ViewerArgs};
pub use controllers::cli::RenderOnceController;
pub use controllers::interactive::{DisplaySurface, InteractiveController, ViewerStatus};
pub use logging::init_tracing;

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
