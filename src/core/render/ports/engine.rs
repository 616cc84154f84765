use std::fmt;
use std::io;

use crate::core::data::render_request::RenderRequest;
use crate::core::render::outcome::RenderError;

/// How the engine process ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineExit {
    code: Option<i32>,
}

impl EngineExit {
    /// `None` means the process ended without an exit code (killed by a signal).
    #[must_use]
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for EngineExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Result of a single blocking wait on the engine process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessWait {
    Exited(EngineExit),
    /// The wait returned but the process is still running.
    Woken,
}

pub trait EngineProcess: Send {
    fn wait(&mut self) -> io::Result<ProcessWait>;
}

/// Launches the external renderer for one request.
pub trait RenderEngine: Send + Sync {
    fn spawn(&self, request: &RenderRequest) -> Result<Box<dyn EngineProcess>, RenderError>;
}
