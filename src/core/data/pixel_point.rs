/// Integer screen coordinate. Origin is the top-left corner, y grows downward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal distance from `self` to `other`.
    #[must_use]
    pub fn dx(&self, other: PixelPoint) -> i32 {
        other.x - self.x
    }

    /// Vertical distance from `self` to `other`.
    #[must_use]
    pub fn dy(&self, other: PixelPoint) -> i32 {
        other.y - self.y
    }
}

/// Pixel dimensions of the display surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && i64::from(point.x) < i64::from(self.width)
            && i64::from(point.y) < i64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dx_dy_are_signed() {
        let a = PixelPoint::new(10, 40);
        let b = PixelPoint::new(4, 60);

        assert_eq!(a.dx(b), -6);
        assert_eq!(a.dy(b), 20);
        assert_eq!(b.dx(a), 6);
    }

    #[test]
    fn test_surface_contains_point() {
        let size = SurfaceSize::new(100, 50);

        assert!(size.contains(PixelPoint::new(0, 0)));
        assert!(size.contains(PixelPoint::new(99, 49)));
        assert!(!size.contains(PixelPoint::new(100, 10)));
        assert!(!size.contains(PixelPoint::new(10, 50)));
        assert!(!size.contains(PixelPoint::new(-1, 10)));
        assert!(!size.contains(PixelPoint::new(10, -1)));
    }

    #[test]
    fn test_surface_is_empty() {
        assert!(SurfaceSize::new(0, 10).is_empty());
        assert!(SurfaceSize::new(10, 0).is_empty());
        assert!(!SurfaceSize::new(1, 1).is_empty());
    }
}
