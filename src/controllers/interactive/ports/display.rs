use crate::core::data::decoded_image::DecodedImage;
use crate::core::render::outcome::RenderFailure;

/// The surface showing the current image. Called only from the UI context.
pub trait DisplaySurface {
    /// A new image is ready and replaces the one on screen.
    fn show_image(&mut self, image: DecodedImage);

    /// A render failed. The viewer terminates after this returns.
    fn show_failure(&mut self, failure: &RenderFailure);
}
