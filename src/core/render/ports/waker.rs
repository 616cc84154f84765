/// Nudges the UI context so it drains delivered render outcomes.
///
/// Called from the render worker; implementations must only signal, never touch UI state.
pub trait UiWaker: Send + Sync {
    fn wake(&self);
}
