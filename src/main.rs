use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use mandelbrot_viewer::{ProcessEngine, RenderOnceController, ViewerArgs};

fn main() -> ExitCode {
    mandelbrot_viewer::init_tracing();
    let args = ViewerArgs::parse();

    let (settings, viewport) = match args.resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    let request = match settings.request_for(viewport) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "invalid render request");
            return ExitCode::from(2);
        }
    };

    let controller = RenderOnceController::new(Arc::new(ProcessEngine::new(&args.engine)));

    match controller.render(&request) {
        Ok(image) => {
            info!(
                width = image.width(),
                height = image.height(),
                path = %request.output_path().display(),
                "render complete"
            );
            ExitCode::SUCCESS
        }
        Err(failure) => {
            error!(%failure, "render failed");
            ExitCode::from(1)
        }
    }
}
