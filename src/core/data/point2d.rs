/// A point in the complex plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point2D {
    pub real: f64,
    pub imag: f64,
}

impl Point2D {
    #[must_use]
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }
}
