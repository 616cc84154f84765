use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::core::data::render_request::RenderRequest;
use crate::core::render::outcome::RenderError;
use crate::core::render::ports::engine::{EngineExit, EngineProcess, ProcessWait, RenderEngine};

/// Runs the renderer as a child process, one process per request.
pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl RenderEngine for ProcessEngine {
    fn spawn(&self, request: &RenderRequest) -> Result<Box<dyn EngineProcess>, RenderError> {
        let args = request.engine_args();
        debug!(program = %self.program.display(), ?args, "spawning engine");

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        Ok(Box::new(ChildProcess { child }))
    }
}

struct ChildProcess {
    child: Child,
}

impl EngineProcess for ChildProcess {
    fn wait(&mut self) -> io::Result<ProcessWait> {
        match self.child.wait() {
            Ok(status) => Ok(ProcessWait::Exited(EngineExit::from_code(status.code()))),
            // interrupted before the child reported; only an observed exit counts
            Err(err) if err.kind() == io::ErrorKind::Interrupted => match self.child.try_wait()? {
                Some(status) => Ok(ProcessWait::Exited(EngineExit::from_code(status.code()))),
                None => Ok(ProcessWait::Woken),
            },
            Err(err) => Err(err),
        }
    }
}
