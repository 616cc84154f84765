use std::sync::Mutex;

use tracing::{debug, warn};
use winit::event_loop::EventLoopProxy;

use crate::core::render::ports::waker::UiWaker;
use crate::input::gui::events::GuiEvent;

/// Wakes the winit event loop from a render worker thread.
pub struct EventLoopWaker {
    event_loop_proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl EventLoopWaker {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            event_loop_proxy: Mutex::new(event_loop_proxy),
        }
    }
}

impl UiWaker for EventLoopWaker {
    fn wake(&self) {
        let Ok(proxy) = self.event_loop_proxy.lock() else {
            warn!("event loop proxy lock poisoned, wake dropped");
            return;
        };

        if proxy.send_event(GuiEvent::Wake).is_err() {
            debug!("event loop already closed, wake dropped");
        }
    }
}
