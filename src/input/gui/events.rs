/// User events posted to the winit event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiEvent {
    /// A render outcome is waiting in the scheduler's channel.
    ///
    /// The handler pumps the controller; it does not redraw by itself.
    Wake,
}
