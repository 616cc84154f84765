use crate::core::data::pixel_point::{PixelPoint, SurfaceSize};
use crate::core::data::point2d::Point2D;

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("viewport diameter must be positive and finite: {diameter}")]
    InvalidDiameter { diameter: f64 },
    #[error("viewport center must be finite: ({real}, {imag})")]
    InvalidCenter { real: f64, imag: f64 },
    #[error("viewport size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("zoom selection must span both axes: {dx}x{dy} pixels")]
    DegenerateSelection { dx: u32, dy: u32 },
}

/// The region of the complex plane shown on the display surface, together with
/// the pixel resolution it is rendered at.
///
/// A viewport is never mutated. Zooming and resizing produce a new one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Point2D,
    diameter: f64,
    width_px: u32,
    height_px: u32,
}

impl Viewport {
    pub fn new(center: Point2D, diameter: f64, size: SurfaceSize) -> Result<Self, ViewportError> {
        if !center.is_finite() {
            return Err(ViewportError::InvalidCenter {
                real: center.real,
                imag: center.imag,
            });
        }

        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(ViewportError::InvalidDiameter { diameter });
        }

        if size.is_empty() {
            return Err(ViewportError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            center,
            diameter,
            width_px: size.width,
            height_px: size.height,
        })
    }

    #[must_use]
    pub fn center(&self) -> Point2D {
        self.center
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    #[must_use]
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    #[must_use]
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width_px, self.height_px)
    }

    /// Complex-plane distance covered by one pixel.
    ///
    /// The shorter screen axis spans the full diameter, so the visible region
    /// always contains a `diameter`-wide square around the center.
    #[must_use]
    pub fn pixel_scale(&self) -> f64 {
        self.diameter / f64::from(self.width_px.min(self.height_px))
    }

    #[must_use]
    pub fn pixel_to_complex(&self, point: PixelPoint) -> Point2D {
        self.complex_at(f64::from(point.x), f64::from(point.y))
    }

    /// Builds the viewport selected by dragging from `top_left` to `bottom_right`.
    ///
    /// The corners may be given in any order. The new center is the midpoint of
    /// the selection and the new diameter follows the shorter dragged side, so
    /// the zoom keeps the same aspect lock as [`Viewport::pixel_scale`].
    pub fn zoom_to(
        &self,
        top_left: PixelPoint,
        bottom_right: PixelPoint,
        size: SurfaceSize,
    ) -> Result<Viewport, ViewportError> {
        let dx = top_left.dx(bottom_right).unsigned_abs();
        let dy = top_left.dy(bottom_right).unsigned_abs();

        if dx == 0 || dy == 0 {
            return Err(ViewportError::DegenerateSelection { dx, dy });
        }

        let mid_x = (f64::from(top_left.x) + f64::from(bottom_right.x)) / 2.0;
        let mid_y = (f64::from(top_left.y) + f64::from(bottom_right.y)) / 2.0;
        let center = self.complex_at(mid_x, mid_y);
        let diameter = f64::from(dx.min(dy)) * self.pixel_scale();

        Viewport::new(center, diameter, size)
    }

    /// Same center and diameter at a new pixel resolution.
    pub fn with_size(&self, size: SurfaceSize) -> Result<Viewport, ViewportError> {
        Viewport::new(self.center, self.diameter, size)
    }

    fn complex_at(&self, x: f64, y: f64) -> Point2D {
        let scale = self.pixel_scale();
        let x_offset = x - f64::from(self.width_px) / 2.0;
        let y_offset = y - f64::from(self.height_px) / 2.0;

        // screen y grows downward, the imaginary axis grows upward
        Point2D {
            real: self.center.real + x_offset * scale,
            imag: self.center.imag - y_offset * scale,
        }
    }
}
