use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::data::viewport::Viewport;

/// Largest image side the engine can address; it stores dimensions as 16-bit values.
pub const MAX_ENGINE_DIMENSION: u32 = u16::MAX as u32;

/// Largest worker count the engine accepts; it reads `-t` as a 16-bit value.
pub const MAX_ENGINE_WORKERS: u32 = u16::MAX as u32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderRequestError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("worker count {worker_count} exceeds the engine limit of {MAX_ENGINE_WORKERS}")]
    TooManyWorkers { worker_count: u32 },
    #[error(
        "render of {width}x{height} at supersample level {supersample} exceeds the engine limit of {MAX_ENGINE_DIMENSION} pixels per side"
    )]
    DimensionTooLarge {
        width: u32,
        height: u32,
        supersample: u32,
    },
}

/// Parameters shared by every render the viewer dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub supersample: u32,
    pub worker_count: u32,
    pub max_iterations: Option<u64>,
    pub output_path: PathBuf,
}

impl RenderSettings {
    pub fn request_for(&self, viewport: Viewport) -> Result<RenderRequest, RenderRequestError> {
        RenderRequest::new(
            viewport,
            self.supersample,
            self.worker_count,
            self.max_iterations,
            self.output_path.clone(),
        )
    }
}

/// One render, consumed by the scheduler exactly once.
#[derive(Debug, PartialEq)]
pub struct RenderRequest {
    viewport: Viewport,
    supersample: u32,
    worker_count: u32,
    max_iterations: Option<u64>,
    output_path: PathBuf,
}

impl RenderRequest {
    pub fn new(
        viewport: Viewport,
        supersample: u32,
        worker_count: u32,
        max_iterations: Option<u64>,
        output_path: PathBuf,
    ) -> Result<Self, RenderRequestError> {
        if worker_count == 0 {
            return Err(RenderRequestError::ZeroWorkers);
        }

        if worker_count > MAX_ENGINE_WORKERS {
            return Err(RenderRequestError::TooManyWorkers { worker_count });
        }

        let width = viewport.width_px();
        let height = viewport.height_px();
        let fits = |side: u32| {
            supersample < u32::BITS
                && u64::from(side) << supersample <= u64::from(MAX_ENGINE_DIMENSION)
        };

        if !fits(width) || !fits(height) {
            return Err(RenderRequestError::DimensionTooLarge {
                width,
                height,
                supersample,
            });
        }

        Ok(Self {
            viewport,
            supersample,
            worker_count,
            max_iterations,
            output_path,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn supersample(&self) -> u32 {
        self.supersample
    }

    #[must_use]
    pub fn worker_count(&self) -> u32 {
        self.worker_count
    }

    #[must_use]
    pub fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Command-line arguments for the engine, excluding the program name.
    #[must_use]
    pub fn engine_args(&self) -> Vec<OsString> {
        let center = self.viewport.center();

        let mut args: Vec<OsString> = vec![
            "-t".into(),
            self.worker_count.to_string().into(),
            "-f".into(),
            self.output_path.clone().into_os_string(),
            "-w".into(),
            self.viewport.width_px().to_string().into(),
            "-h".into(),
            self.viewport.height_px().to_string().into(),
            "-x".into(),
            center.real.to_string().into(),
            "-y".into(),
            center.imag.to_string().into(),
            "-r".into(),
            self.viewport.diameter().to_string().into(),
            "-s".into(),
            self.supersample.to_string().into(),
        ];

        if let Some(iterations) = self.max_iterations {
            args.push("-a".into());
            args.push(iterations.to_string().into());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_point::SurfaceSize;
    use crate::core::data::point2d::Point2D;

    fn viewport(width: u32, height: u32) -> Viewport {
        Viewport::new(
            Point2D::new(-0.5, 0.25),
            1.5,
            SurfaceSize::new(width, height),
        )
        .unwrap()
    }

    fn settings() -> RenderSettings {
        RenderSettings {
            supersample: 1,
            worker_count: 8,
            max_iterations: None,
            output_path: PathBuf::from("./__bitmap.bmp"),
        }
    }

    #[test]
    fn test_engine_args_follow_flag_order() {
        let request = settings().request_for(viewport(1280, 768)).unwrap();

        let args: Vec<String> = request
            .engine_args()
            .into_iter()
            .map(|arg| arg.into_string().unwrap())
            .collect();

        assert_eq!(
            args,
            vec![
                "-t", "8", "-f", "./__bitmap.bmp", "-w", "1280", "-h", "768", "-x", "-0.5", "-y",
                "0.25", "-r", "1.5", "-s", "1",
            ]
        );
    }

    #[test]
    fn test_engine_args_append_iterations_when_set() {
        let mut settings = settings();
        settings.max_iterations = Some(5000);

        let args = settings
            .request_for(viewport(64, 64))
            .unwrap()
            .engine_args();

        assert_eq!(args[args.len() - 2], OsString::from("-a"));
        assert_eq!(args[args.len() - 1], OsString::from("5000"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut settings = settings();
        settings.worker_count = 0;

        assert_eq!(
            settings.request_for(viewport(64, 64)),
            Err(RenderRequestError::ZeroWorkers)
        );
    }

    #[test]
    fn test_worker_count_must_fit_engine_limit() {
        let mut settings = settings();
        settings.worker_count = MAX_ENGINE_WORKERS;
        assert!(settings.request_for(viewport(64, 64)).is_ok());

        settings.worker_count = MAX_ENGINE_WORKERS + 1;
        assert_eq!(
            settings.request_for(viewport(64, 64)),
            Err(RenderRequestError::TooManyWorkers {
                worker_count: 65_536
            })
        );
    }

    #[test]
    fn test_supersampled_size_must_fit_engine_limit() {
        let mut settings = settings();
        settings.supersample = 2;

        assert!(settings.request_for(viewport(16_383, 100)).is_ok());
        assert_eq!(
            settings.request_for(viewport(16_384, 100)),
            Err(RenderRequestError::DimensionTooLarge {
                width: 16_384,
                height: 100,
                supersample: 2
            })
        );

        settings.supersample = 40;
        assert!(settings.request_for(viewport(1, 1)).is_err());
    }

    #[test]
    fn test_request_keeps_settings() {
        let request = settings().request_for(viewport(320, 200)).unwrap();

        assert_eq!(request.viewport(), viewport(320, 200));
        assert_eq!(request.supersample(), 1);
        assert_eq!(request.worker_count(), 8);
        assert_eq!(request.max_iterations(), None);
        assert_eq!(request.output_path(), Path::new("./__bitmap.bmp"));
    }
}
