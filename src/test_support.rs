//! Fakes for the engine, waker and display ports.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};

use crate::controllers::interactive::ports::display::DisplaySurface;
use crate::core::data::decoded_image::DecodedImage;
use crate::core::data::pixel_point::SurfaceSize;
use crate::core::data::render_request::RenderRequest;
use crate::core::render::outcome::{RenderError, RenderFailure};
use crate::core::render::ports::engine::{EngineExit, EngineProcess, ProcessWait, RenderEngine};
use crate::core::render::ports::waker::UiWaker;

#[derive(Default)]
pub struct CountingWaker {
    wakes: AtomicUsize,
}

impl CountingWaker {
    pub fn wakes(&self) -> usize {
        self.wakes.load(Ordering::SeqCst)
    }
}

impl UiWaker for CountingWaker {
    fn wake(&self) {
        self.wakes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub images: Vec<DecodedImage>,
    pub failures: Vec<RenderFailure>,
}

impl DisplaySurface for RecordingDisplay {
    fn show_image(&mut self, image: DecodedImage) {
        self.images.push(image);
    }

    fn show_failure(&mut self, failure: &RenderFailure) {
        self.failures.push(failure.clone());
    }
}

/// Engine double. Each spawned process can be held back by a gate until the
/// test releases it.
pub struct FakeEngine {
    exit_code: i32,
    writes_image: bool,
    fails_spawn: bool,
    panics: bool,
    spurious_wakes: usize,
    spawns: AtomicUsize,
    wait_calls: Arc<AtomicUsize>,
    gates: Mutex<VecDeque<Receiver<()>>>,
    spawned_sizes: Mutex<Vec<SurfaceSize>>,
}

impl FakeEngine {
    fn new(exit_code: i32, writes_image: bool, fails_spawn: bool) -> Self {
        Self {
            exit_code,
            writes_image,
            fails_spawn,
            panics: false,
            spurious_wakes: 0,
            spawns: AtomicUsize::new(0),
            wait_calls: Arc::new(AtomicUsize::new(0)),
            gates: Mutex::new(VecDeque::new()),
            spawned_sizes: Mutex::new(Vec::new()),
        }
    }

    /// Exits 0 after writing a solid image of the requested size.
    pub fn succeeding() -> Self {
        Self::new(0, true, false)
    }

    /// Exits with `code` without writing anything.
    pub fn exiting_with(code: i32) -> Self {
        Self::new(code, false, false)
    }

    pub fn failing_spawn() -> Self {
        Self::new(0, false, true)
    }

    /// Panics inside `spawn`, like an adapter bug would.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::new(0, false, false)
        }
    }

    pub fn with_spurious_wakes(mut self, wakes: usize) -> Self {
        self.spurious_wakes = wakes;
        self
    }

    /// Holds the next spawned process in `wait` until the returned sender fires.
    pub fn gate(&self) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn spawn_count(&self) -> usize {
        self.spawns.load(Ordering::SeqCst)
    }

    pub fn wait_calls(&self) -> usize {
        self.wait_calls.load(Ordering::SeqCst)
    }

    pub fn spawned_sizes(&self) -> Vec<SurfaceSize> {
        self.spawned_sizes.lock().unwrap().clone()
    }
}

impl RenderEngine for FakeEngine {
    fn spawn(&self, request: &RenderRequest) -> Result<Box<dyn EngineProcess>, RenderError> {
        self.spawns.fetch_add(1, Ordering::SeqCst);
        self.spawned_sizes
            .lock()
            .unwrap()
            .push(request.viewport().size());

        if self.panics {
            panic!("engine exploded");
        }

        if self.fails_spawn {
            return Err(RenderError::Spawn {
                program: "fake-engine".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            });
        }

        let image = self.writes_image.then(|| {
            (
                request.output_path().to_path_buf(),
                request.viewport().size(),
            )
        });

        Ok(Box::new(FakeProcess {
            gate: self.gates.lock().unwrap().pop_front(),
            wakes_left: self.spurious_wakes,
            exit_code: self.exit_code,
            image,
            wait_calls: Arc::clone(&self.wait_calls),
        }))
    }
}

struct FakeProcess {
    gate: Option<Receiver<()>>,
    wakes_left: usize,
    exit_code: i32,
    image: Option<(PathBuf, SurfaceSize)>,
    wait_calls: Arc<AtomicUsize>,
}

impl EngineProcess for FakeProcess {
    fn wait(&mut self) -> io::Result<ProcessWait> {
        self.wait_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gate.take() {
            let _ = gate.recv();
        }

        if self.wakes_left > 0 {
            self.wakes_left -= 1;
            return Ok(ProcessWait::Woken);
        }

        if let Some((path, size)) = self.image.take() {
            RgbImage::from_pixel(size.width, size.height, Rgb([200, 40, 90]))
                .save_with_format(&path, image::ImageFormat::Bmp)
                .map_err(io::Error::other)?;
        }

        Ok(ProcessWait::Exited(EngineExit::from_code(Some(
            self.exit_code,
        ))))
    }
}

/// Polls `probe` until it yields a value or `timeout` passes.
pub fn wait_until<T>(timeout: Duration, mut probe: impl FnMut() -> Option<T>) -> Option<T> {
    let start = Instant::now();
    loop {
        if let Some(value) = probe() {
            return Some(value);
        }
        if start.elapsed() >= timeout {
            return None;
        }
        thread::sleep(Duration::from_millis(5));
    }
}
