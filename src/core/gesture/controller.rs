use tracing::{debug, warn};

use crate::core::data::pixel_point::{PixelPoint, SurfaceSize};
use crate::core::data::render_request::{RenderRequest, RenderSettings};
use crate::core::data::viewport::Viewport;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Pressing { anchor: PixelPoint },
}

/// Turns pointer input on the display surface into render requests.
///
/// Every path out of `Pressing` returns to `Idle`. Only a release inside the
/// surface with a non-zero drag on both axes yields a zoom request.
pub struct GestureController {
    state: GestureState,
    settings: RenderSettings,
}

impl GestureController {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            state: GestureState::Idle,
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Starts a selection at `point` unless a render is in flight.
    pub fn on_press(&mut self, point: PixelPoint, busy: bool) {
        if busy {
            debug!(x = point.x, y = point.y, "press ignored while rendering");
            return;
        }

        self.state = GestureState::Pressing { anchor: point };
    }

    pub fn on_release(
        &mut self,
        point: PixelPoint,
        viewport: &Viewport,
        surface: SurfaceSize,
        busy: bool,
    ) -> Option<RenderRequest> {
        let GestureState::Pressing { anchor } = self.state else {
            return None;
        };
        self.state = GestureState::Idle;

        if busy {
            debug!("release ignored while rendering");
            return None;
        }

        if !surface.contains(point) {
            debug!(x = point.x, y = point.y, "release outside surface cancels gesture");
            return None;
        }

        if anchor.dx(point) == 0 || anchor.dy(point) == 0 {
            debug!("zero-sized selection discarded");
            return None;
        }

        let zoomed = match viewport.zoom_to(anchor, point, surface) {
            Ok(zoomed) => zoomed,
            Err(err) => {
                debug!(error = %err, "selection discarded");
                return None;
            }
        };

        self.request_for(zoomed)
    }

    /// The pointer left the surface; any selection in progress is dropped.
    pub fn on_leave(&mut self) {
        if self.state != GestureState::Idle {
            debug!("pointer left surface, gesture cancelled");
        }

        self.state = GestureState::Idle;
    }

    /// Cancels any selection and requests the current view at the new size.
    pub fn on_resize(&mut self, size: SurfaceSize, viewport: &Viewport) -> Option<RenderRequest> {
        self.state = GestureState::Idle;

        if size.is_empty() {
            return None;
        }

        match viewport.with_size(size) {
            Ok(resized) => self.request_for(resized),
            Err(err) => {
                warn!(error = %err, "resize produced an invalid viewport");
                None
            }
        }
    }

    /// Rectangle between the press point and `cursor` while a selection is active.
    #[must_use]
    pub fn selection(&self, cursor: PixelPoint) -> Option<(PixelPoint, PixelPoint)> {
        match self.state {
            GestureState::Pressing { anchor } => Some((anchor, cursor)),
            GestureState::Idle => None,
        }
    }

    fn request_for(&self, viewport: Viewport) -> Option<RenderRequest> {
        match self.settings.request_for(viewport) {
            Ok(request) => Some(request),
            Err(err) => {
                warn!(error = %err, "render request rejected");
                None
            }
        }
    }
}
