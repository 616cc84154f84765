use std::sync::Arc;

use tracing::debug;

use crate::controllers::interactive::ports::display::DisplaySurface;
use crate::controllers::interactive::scheduler::{Delivery, RenderScheduler, SchedulerAction};
use crate::controllers::interactive::view_state::ViewState;
use crate::core::data::pixel_point::{PixelPoint, SurfaceSize};
use crate::core::data::render_request::{RenderRequest, RenderSettings};
use crate::core::data::viewport::Viewport;
use crate::core::gesture::GestureController;
use crate::core::render::ports::engine::RenderEngine;
use crate::core::render::ports::waker::UiWaker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    Running,
    /// A render failed; the caller should exit.
    Terminated,
}

/// Entry point for the display surface. Every method runs on the UI context.
pub struct InteractiveController {
    view: ViewState,
    gesture: GestureController,
    scheduler: RenderScheduler,
    cursor: Option<PixelPoint>,
}

impl InteractiveController {
    pub fn new(
        viewport: Viewport,
        settings: RenderSettings,
        engine: Arc<dyn RenderEngine>,
        waker: Arc<dyn UiWaker>,
    ) -> Self {
        Self {
            view: ViewState::new(viewport),
            gesture: GestureController::new(settings),
            scheduler: RenderScheduler::new(engine, waker),
            cursor: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy() || self.scheduler.is_terminated()
    }

    pub fn on_pointer_pressed(&mut self, point: PixelPoint) {
        self.cursor = Some(point);
        let busy = self.is_busy();
        self.gesture.on_press(point, busy);
    }

    pub fn on_pointer_moved(&mut self, point: PixelPoint) {
        self.cursor = Some(point);
    }

    pub fn on_pointer_released(&mut self, point: PixelPoint) {
        self.cursor = Some(point);
        let busy = self.is_busy();
        let viewport = self.view.viewport();

        if let Some(request) = self
            .gesture
            .on_release(point, &viewport, self.view.surface(), busy)
        {
            self.submit(request);
        }
    }

    pub fn on_pointer_left(&mut self) {
        self.cursor = None;
        self.gesture.on_leave();
    }

    pub fn on_resize(&mut self, size: SurfaceSize) {
        self.view.resize_surface(size);
        let viewport = self.view.viewport();

        if let Some(request) = self.gesture.on_resize(size, &viewport) {
            self.submit(request);
        }
    }

    /// Rubber band to draw while a selection is in progress.
    #[must_use]
    pub fn selection(&self) -> Option<(PixelPoint, PixelPoint)> {
        self.cursor.and_then(|cursor| self.gesture.selection(cursor))
    }

    /// Applies any finished render to `display`. Call whenever the UI is woken.
    pub fn pump(&mut self, display: &mut dyn DisplaySurface) -> ViewerStatus {
        while let Some(delivery) = self.scheduler.poll_outcome(display) {
            match delivery {
                Delivery::Presented(viewport) => {
                    self.view.present(viewport);
                    self.reconcile_size();
                }
                Delivery::Fatal(_) => return ViewerStatus::Terminated,
                Delivery::Ignored => {}
            }
        }

        if self.scheduler.is_terminated() {
            ViewerStatus::Terminated
        } else {
            ViewerStatus::Running
        }
    }

    // A resize dropped while busy is not queued; catch up once idle.
    fn reconcile_size(&mut self) {
        if !self.view.needs_resize() {
            return;
        }

        debug!(
            width = self.view.surface().width,
            height = self.view.surface().height,
            "surface changed during render, requesting new size"
        );
        self.on_resize(self.view.surface());
    }

    fn submit(&mut self, request: RenderRequest) {
        let viewport = request.viewport();

        let duplicate = self.scheduler.in_flight_viewport() == Some(viewport)
            || (!self.scheduler.is_busy() && self.view.displayed() == Some(viewport));
        if duplicate {
            debug!("viewport already rendered or rendering, request skipped");
            return;
        }

        match self.scheduler.request_render(request) {
            SchedulerAction::Started => self.view.accept(viewport),
            SchedulerAction::Dropped | SchedulerAction::Terminated => {}
        }
    }
}
