//! Copies decoded images into a window framebuffer.

use rayon::prelude::*;

use crate::core::data::decoded_image::DecodedImage;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("frame of {width}x{height} needs {expected} bytes, got {actual}")]
pub struct FrameSizeError {
    pub width: u32,
    pub height: u32,
    pub expected: usize,
    pub actual: usize,
}

/// Draws `image` at the top-left of an RGBA `frame`.
///
/// Parts of the image outside the frame are clipped and frame pixels the image
/// does not cover are filled with opaque black. Rows are copied in parallel.
pub fn blit_rgba(
    image: &DecodedImage,
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
) -> Result<(), FrameSizeError> {
    let expected = frame_width as usize * frame_height as usize * 4;
    if frame.len() != expected {
        return Err(FrameSizeError {
            width: frame_width,
            height: frame_height,
            expected,
            actual: frame.len(),
        });
    }

    if expected == 0 {
        return Ok(());
    }

    let row_bytes = frame_width as usize * 4;
    let image_row_bytes = image.width() as usize * 4;
    let copy_bytes = row_bytes.min(image_row_bytes);
    let src = image.rgba();

    frame
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let mut covered = 0;

            if y < image.height() as usize {
                let start = y * image_row_bytes;
                row[..copy_bytes].copy_from_slice(&src[start..start + copy_bytes]);
                covered = copy_bytes;
            }

            for pixel in row[covered..].chunks_exact_mut(4) {
                pixel.copy_from_slice(&BACKGROUND);
            }
        });

    Ok(())
}
