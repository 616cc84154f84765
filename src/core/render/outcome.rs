use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::data::decoded_image::DecodedImage;
use crate::storage::read_image::ReadImageError;

/// Why a render did not produce an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("launch/exec error: could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("launch/exec error: {reason}")]
    Execution { reason: String },
    #[error("decode error: {path}: {source}", path = .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ReadImageError,
    },
}

/// A failed render as seen by the viewer. The kind of failure is not kept;
/// none of them can be recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    reason: String,
}

impl RenderFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed: {}", self.reason)
    }
}

impl From<RenderError> for RenderFailure {
    fn from(err: RenderError) -> Self {
        Self::new(err.to_string())
    }
}

/// Terminal result of one render job.
#[derive(Debug)]
pub enum RenderOutcome {
    Success(DecodedImage),
    Failure(RenderFailure),
}

impl From<Result<DecodedImage, RenderError>> for RenderOutcome {
    fn from(result: Result<DecodedImage, RenderError>) -> Self {
        match result {
            Ok(image) => Self::Success(image),
            Err(err) => Self::Failure(err.into()),
        }
    }
}
