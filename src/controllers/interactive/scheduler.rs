use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::{debug, error, info, warn};

use crate::controllers::interactive::ports::display::DisplaySurface;
use crate::core::data::render_request::RenderRequest;
use crate::core::data::viewport::Viewport;
use crate::core::render::job::{OutcomeSender, RenderJob};
use crate::core::render::outcome::{RenderError, RenderFailure, RenderOutcome};
use crate::core::render::ports::engine::RenderEngine;
use crate::core::render::ports::waker::UiWaker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerAction {
    Started,
    /// A job was already running; the request is gone.
    Dropped,
    /// A render failed earlier and the viewer is shutting down.
    Terminated,
}

/// What the UI context should do after an outcome was delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Presented(Viewport),
    Fatal(RenderFailure),
    /// An image arrived with no job in flight and was discarded.
    Ignored,
}

struct InFlight {
    viewport: Viewport,
    // None when the worker thread itself could not be spawned
    job: Option<RenderJob>,
}

/// Runs at most one render job at a time.
///
/// Lives on the UI context. Jobs report through a channel that is drained by
/// [`RenderScheduler::poll_outcome`], so the busy flag and the displayed image
/// only ever change on the UI context.
pub struct RenderScheduler {
    engine: Arc<dyn RenderEngine>,
    waker: Arc<dyn UiWaker>,
    outcome_tx: Sender<RenderOutcome>,
    outcome_rx: Receiver<RenderOutcome>,
    in_flight: Option<InFlight>,
    terminated: bool,
}

impl RenderScheduler {
    pub fn new(engine: Arc<dyn RenderEngine>, waker: Arc<dyn UiWaker>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();

        Self {
            engine,
            waker,
            outcome_tx,
            outcome_rx,
            in_flight: None,
            terminated: false,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[must_use]
    pub fn in_flight_viewport(&self) -> Option<Viewport> {
        self.in_flight.as_ref().map(|in_flight| in_flight.viewport)
    }

    pub fn request_render(&mut self, request: RenderRequest) -> SchedulerAction {
        if self.terminated {
            debug!("render request refused, viewer is terminating");
            return SchedulerAction::Terminated;
        }

        if self.in_flight.is_some() {
            debug!("render request dropped, a job is already running");
            return SchedulerAction::Dropped;
        }

        let viewport = request.viewport();
        let sender = OutcomeSender::new(self.outcome_tx.clone(), Arc::clone(&self.waker));

        let job = match RenderJob::start(request, Arc::clone(&self.engine), sender) {
            Ok(job) => Some(job),
            Err(source) => {
                error!(error = %source, "could not start render worker");
                let failure = RenderError::Spawn {
                    program: "render worker thread".to_string(),
                    source,
                };
                self.post(RenderOutcome::Failure(failure.into()));
                None
            }
        };

        self.in_flight = Some(InFlight { viewport, job });

        SchedulerAction::Started
    }

    /// Delivers a pending outcome, if any, without blocking.
    pub fn poll_outcome(&mut self, display: &mut dyn DisplaySurface) -> Option<Delivery> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(self.on_outcome(outcome, display)),
            Err(TryRecvError::Empty) => None,
            // unreachable while we hold outcome_tx
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Applies a job's outcome. Must run on the UI context.
    ///
    /// The scheduler is idle again before the display is notified, so anything
    /// the display does in response sees a consistent state. A failure is
    /// terminal: no further requests are accepted.
    pub fn on_outcome(
        &mut self,
        outcome: RenderOutcome,
        display: &mut dyn DisplaySurface,
    ) -> Delivery {
        let finished = self.in_flight.take();

        if let Some(InFlight { job: Some(job), .. }) = &finished {
            if !job.is_finished() {
                debug!("outcome arrived before render worker exited");
            }
        }

        match outcome {
            RenderOutcome::Success(image) => {
                let Some(InFlight { viewport, .. }) = finished else {
                    warn!("image delivered with no render in flight, discarding");
                    return Delivery::Ignored;
                };

                info!(
                    width = image.width(),
                    height = image.height(),
                    "presenting rendered image"
                );
                display.show_image(image);

                Delivery::Presented(viewport)
            }
            RenderOutcome::Failure(failure) => {
                self.terminated = true;
                error!(reason = failure.reason(), "render failed, terminating");
                display.show_failure(&failure);

                Delivery::Fatal(failure)
            }
        }
    }

    fn post(&self, outcome: RenderOutcome) {
        OutcomeSender::new(self.outcome_tx.clone(), Arc::clone(&self.waker)).deliver(outcome);
    }
}
