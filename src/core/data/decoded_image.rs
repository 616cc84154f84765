use crate::core::data::pixel_point::SurfaceSize;

const BYTES_PER_PIXEL: usize = 4;

fn rgba_buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodedImageError {
    #[error("image size {width}x{height} needs {expected} bytes but buffer has {actual}")]
    BoundsMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// An image read back from the engine's output file, stored as tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, DecodedImageError> {
        let expected = rgba_buffer_size(width, height);

        if expected != rgba.len() {
            return Err(DecodedImageError::BoundsMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let bytes = &self.rgba[offset..offset + BYTES_PER_PIXEL];

        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
