use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use mandelbrot_viewer::{PixelsPresenterFactory, RunGuiCommand, ViewerArgs, ViewerStatus};

fn main() -> ExitCode {
    mandelbrot_viewer::init_tracing();
    let args = ViewerArgs::parse();

    let command = RunGuiCommand::new(PixelsPresenterFactory::new());

    match command.execute(&args) {
        Ok(ViewerStatus::Running) => ExitCode::SUCCESS,
        Ok(ViewerStatus::Terminated) => ExitCode::from(1),
        Err(err) => {
            error!(error = %err, "viewer failed");
            ExitCode::from(1)
        }
    }
}
