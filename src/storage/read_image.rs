use std::io;
use std::path::Path;

use image::ImageReader;

use crate::core::data::decoded_image::{DecodedImage, DecodedImageError};

#[derive(Debug, thiserror::Error)]
pub enum ReadImageError {
    #[error("failed to read image file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Buffer(#[from] DecodedImageError),
}

/// Reads the file the engine wrote. The format is sniffed from the contents,
/// so the fixed output path does not need a matching extension.
pub fn read_image(filepath: impl AsRef<Path>) -> Result<DecodedImage, ReadImageError> {
    let decoded = ImageReader::open(filepath)?
        .with_guessed_format()?
        .decode()?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage::from_rgba(width, height, rgba.into_raw())?)
}
