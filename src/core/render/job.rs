use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{error, info, trace, warn};

use crate::core::data::decoded_image::DecodedImage;
use crate::core::data::render_request::RenderRequest;
use crate::core::data::viewport::Viewport;
use crate::core::render::outcome::{RenderError, RenderOutcome};
use crate::core::render::ports::engine::{EngineExit, EngineProcess, ProcessWait, RenderEngine};
use crate::core::render::ports::waker::UiWaker;
use crate::storage::read_image::read_image;

/// Carries a job's single outcome back to the UI context.
///
/// `deliver` consumes the sender, so a job can report at most once.
pub struct OutcomeSender {
    tx: Sender<RenderOutcome>,
    waker: Arc<dyn UiWaker>,
}

impl OutcomeSender {
    pub fn new(tx: Sender<RenderOutcome>, waker: Arc<dyn UiWaker>) -> Self {
        Self { tx, waker }
    }

    pub fn deliver(self, outcome: RenderOutcome) {
        if self.tx.send(outcome).is_err() {
            warn!("render outcome dropped, UI context is gone");
            return;
        }

        self.waker.wake();
    }
}

/// A render running on its own worker thread.
pub struct RenderJob {
    viewport: Viewport,
    worker: JoinHandle<()>,
}

impl RenderJob {
    /// Spawns the worker and returns immediately.
    pub fn start(
        request: RenderRequest,
        engine: Arc<dyn RenderEngine>,
        sender: OutcomeSender,
    ) -> io::Result<Self> {
        let viewport = request.viewport();

        let worker = thread::Builder::new()
            .name("render-job".to_string())
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    Self::run(&request, engine.as_ref())
                }))
                .unwrap_or_else(|payload| {
                    let reason = format!("render worker panicked: {}", panic_message(&*payload));
                    error!(%reason, "render aborted");
                    RenderOutcome::Failure(RenderError::Execution { reason }.into())
                });

                sender.deliver(outcome);
            })?;

        Ok(Self { viewport, worker })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Runs a render to completion on the calling thread.
    pub fn run(request: &RenderRequest, engine: &dyn RenderEngine) -> RenderOutcome {
        let viewport = request.viewport();
        let center = viewport.center();

        info!(
            width = viewport.width_px(),
            height = viewport.height_px(),
            real = center.real,
            imag = center.imag,
            diameter = viewport.diameter(),
            "render started"
        );

        let start = Instant::now();
        let result = Self::execute(request, engine);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(image) => info!(
                elapsed_ms,
                width = image.width(),
                height = image.height(),
                "render finished"
            ),
            Err(err) => error!(elapsed_ms, error = %err, "render failed"),
        }

        result.into()
    }

    fn execute(
        request: &RenderRequest,
        engine: &dyn RenderEngine,
    ) -> Result<DecodedImage, RenderError> {
        let mut process = engine.spawn(request)?;
        let exit = wait_for_exit(process.as_mut())?;

        if !exit.success() {
            return Err(RenderError::Execution {
                reason: format!("engine ended with {exit}"),
            });
        }

        read_image(request.output_path()).map_err(|source| RenderError::Decode {
            path: request.output_path().to_path_buf(),
            source,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown cause"
    }
}

/// Blocks until the process reports that it exited. Wake-ups without an exit are retried.
fn wait_for_exit(process: &mut dyn EngineProcess) -> Result<EngineExit, RenderError> {
    loop {
        match process.wait() {
            Ok(ProcessWait::Exited(exit)) => return Ok(exit),
            Ok(ProcessWait::Woken) => trace!("engine wait woke before exit, waiting again"),
            Err(err) => {
                return Err(RenderError::Execution {
                    reason: format!("waiting for engine failed: {err}"),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_point::SurfaceSize;
    use crate::core::data::point2d::Point2D;
    use crate::core::data::render_request::RenderSettings;
    use crate::test_support::{CountingWaker, FakeEngine};
    use std::sync::mpsc;
    use std::time::Duration;

    fn request(dir: &tempfile::TempDir, width: u32, height: u32) -> RenderRequest {
        let viewport = Viewport::new(
            Point2D::new(-0.5, 0.0),
            1.5,
            SurfaceSize::new(width, height),
        )
        .unwrap();

        RenderSettings {
            supersample: 0,
            worker_count: 2,
            max_iterations: None,
            output_path: dir.path().join("frame.bmp"),
        }
        .request_for(viewport)
        .unwrap()
    }

    #[test]
    fn successful_exit_decodes_output() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::succeeding();

        let outcome = RenderJob::run(&request(&dir, 6, 4), &engine);

        match outcome {
            RenderOutcome::Success(image) => {
                assert_eq!(image.size(), SurfaceSize::new(6, 4));
            }
            RenderOutcome::Failure(failure) => panic!("unexpected failure: {failure}"),
        }
        assert_eq!(engine.spawn_count(), 1);
    }

    #[test]
    fn spurious_wakes_are_retried() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::succeeding().with_spurious_wakes(3);

        let outcome = RenderJob::run(&request(&dir, 4, 4), &engine);

        assert!(matches!(outcome, RenderOutcome::Success(_)));
        assert_eq!(engine.wait_calls(), 4);
    }

    #[test]
    fn nonzero_exit_is_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::exiting_with(2);

        let outcome = RenderJob::run(&request(&dir, 4, 4), &engine);

        match outcome {
            RenderOutcome::Failure(failure) => {
                assert!(failure.reason().starts_with("launch/exec error"));
                assert!(failure.reason().contains("exit status 2"));
            }
            RenderOutcome::Success(_) => panic!("nonzero exit must fail"),
        }
    }

    #[test]
    fn spawn_failure_is_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::failing_spawn();

        let outcome = RenderJob::run(&request(&dir, 4, 4), &engine);

        match outcome {
            RenderOutcome::Failure(failure) => {
                assert!(failure.reason().starts_with("launch/exec error"));
            }
            RenderOutcome::Success(_) => panic!("spawn failure must fail"),
        }
    }

    #[test]
    fn missing_output_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::exiting_with(0);

        let outcome = RenderJob::run(&request(&dir, 4, 4), &engine);

        match outcome {
            RenderOutcome::Failure(failure) => {
                assert!(failure.reason().starts_with("decode error"));
            }
            RenderOutcome::Success(_) => panic!("missing output must fail"),
        }
    }

    #[test]
    fn start_delivers_exactly_one_outcome_and_wakes_ui() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeEngine::succeeding());
        let waker = Arc::new(CountingWaker::default());
        let (tx, rx) = mpsc::channel();

        let job = RenderJob::start(
            request(&dir, 4, 4),
            Arc::clone(&engine) as Arc<dyn RenderEngine>,
            OutcomeSender::new(tx, Arc::clone(&waker) as Arc<dyn UiWaker>),
        )
        .unwrap();

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(outcome, RenderOutcome::Success(_)));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(waker.wakes(), 1);
        assert_eq!(job.viewport().size(), SurfaceSize::new(4, 4));
    }

    #[test]
    fn panicking_engine_still_delivers_failure() {
        let dir = tempfile::tempdir().unwrap();
        let waker = Arc::new(CountingWaker::default());
        let (tx, rx) = mpsc::channel();

        RenderJob::start(
            request(&dir, 4, 4),
            Arc::new(FakeEngine::panicking()),
            OutcomeSender::new(tx, Arc::clone(&waker) as Arc<dyn UiWaker>),
        )
        .unwrap();

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            RenderOutcome::Failure(failure) => {
                assert!(failure.reason().starts_with("launch/exec error"));
                assert!(failure.reason().contains("render worker panicked: engine exploded"));
            }
            RenderOutcome::Success(_) => panic!("a panicking engine cannot succeed"),
        }
        assert_eq!(waker.wakes(), 1);
    }

    #[test]
    fn start_does_not_block_caller() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeEngine::succeeding());
        let gate = engine.gate();
        let (tx, rx) = mpsc::channel();

        let job = RenderJob::start(
            request(&dir, 4, 4),
            Arc::clone(&engine) as Arc<dyn RenderEngine>,
            OutcomeSender::new(tx, Arc::new(CountingWaker::default())),
        )
        .unwrap();

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert!(!job.is_finished());

        gate.send(()).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
