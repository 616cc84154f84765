use crate::core::data::pixel_point::SurfaceSize;
use crate::core::data::viewport::Viewport;

/// What the UI context knows about the view. Owned by the interactive
/// controller and only changed on the UI context.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    viewport: Viewport,
    surface: SurfaceSize,
    displayed: Option<Viewport>,
}

impl ViewState {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            surface: viewport.size(),
            displayed: None,
        }
    }

    /// Viewport of the most recently accepted render request.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Latest size reported by the display surface.
    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Viewport of the image currently on screen, if any.
    #[must_use]
    pub fn displayed(&self) -> Option<Viewport> {
        self.displayed
    }

    pub(crate) fn accept(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub(crate) fn resize_surface(&mut self, size: SurfaceSize) {
        self.surface = size;
    }

    pub(crate) fn present(&mut self, viewport: Viewport) {
        self.displayed = Some(viewport);
    }

    /// The surface changed size since the last accepted render.
    #[must_use]
    pub fn needs_resize(&self) -> bool {
        !self.surface.is_empty() && self.surface != self.viewport.size()
    }
}
