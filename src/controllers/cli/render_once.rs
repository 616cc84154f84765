use std::sync::Arc;

use tracing::info;

use crate::core::data::decoded_image::DecodedImage;
use crate::core::data::render_request::RenderRequest;
use crate::core::render::job::RenderJob;
use crate::core::render::outcome::{RenderFailure, RenderOutcome};
use crate::core::render::ports::engine::RenderEngine;

/// Renders a single viewport without a display surface.
pub struct RenderOnceController {
    engine: Arc<dyn RenderEngine>,
}

impl RenderOnceController {
    pub fn new(engine: Arc<dyn RenderEngine>) -> Self {
        Self { engine }
    }

    /// Runs the engine on the calling thread and returns the decoded result.
    pub fn render(&self, request: &RenderRequest) -> Result<DecodedImage, RenderFailure> {
        match RenderJob::run(request, self.engine.as_ref()) {
            RenderOutcome::Success(image) => {
                info!(
                    width = image.width(),
                    height = image.height(),
                    path = %request.output_path().display(),
                    "image decoded"
                );
                Ok(image)
            }
            RenderOutcome::Failure(failure) => Err(failure),
        }
    }
}
