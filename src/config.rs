use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use clap::Parser;

use crate::core::data::pixel_point::SurfaceSize;
use crate::core::data::point2d::Point2D;
use crate::core::data::render_request::{MAX_ENGINE_WORKERS, RenderRequestError, RenderSettings};
use crate::core::data::viewport::{Viewport, ViewportError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("--threads must be at least 1")]
    ZeroThreads,
    #[error("invalid initial view: {0}")]
    Viewport(#[from] ViewportError),
    #[error("invalid render settings: {0}")]
    Request(#[from] RenderRequestError),
}

/// Command-line options shared by the headless renderer and the viewer.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Mandelbrot viewer driving an external render engine")]
pub struct ViewerArgs {
    /// Render engine executable
    #[arg(long, default_value = "mandelbrot")]
    pub engine: PathBuf,
    /// Image file the engine writes; overwritten on every render
    #[arg(long, default_value = "./__bitmap.bmp")]
    pub output: PathBuf,
    /// Supersampling level passed to the engine
    #[arg(long, default_value_t = 1)]
    pub supersample: u32,
    /// Engine worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<u32>,
    /// Escape-iteration limit; the engine picks its own when omitted
    #[arg(long)]
    pub iterations: Option<u64>,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_x: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_y: f64,
    /// Width of the initial view on the complex plane
    #[arg(long, default_value_t = 1.5)]
    pub diameter: f64,
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

impl ViewerArgs {
    pub fn worker_count(&self) -> Result<u32, ConfigError> {
        match self.threads {
            Some(0) => Err(ConfigError::ZeroThreads),
            Some(threads) => Ok(threads),
            None => Ok(thread::available_parallelism()
                .map(NonZeroUsize::get)
                .map_or(1, |n| {
                    u32::try_from(n).map_or(MAX_ENGINE_WORKERS, |n| n.min(MAX_ENGINE_WORKERS))
                })),
        }
    }

    pub fn settings(&self) -> Result<RenderSettings, ConfigError> {
        Ok(RenderSettings {
            supersample: self.supersample,
            worker_count: self.worker_count()?,
            max_iterations: self.iterations,
            output_path: self.output.clone(),
        })
    }

    pub fn initial_viewport(&self) -> Result<Viewport, ConfigError> {
        let viewport = Viewport::new(
            Point2D::new(self.center_x, self.center_y),
            self.diameter,
            SurfaceSize::new(self.width, self.height),
        )?;

        Ok(viewport)
    }

    /// Validated settings and initial view. Fails if the initial render could
    /// not be requested.
    pub fn resolve(&self) -> Result<(RenderSettings, Viewport), ConfigError> {
        let settings = self.settings()?;
        let viewport = self.initial_viewport()?;
        settings.request_for(viewport)?;

        Ok((settings, viewport))
    }
}
