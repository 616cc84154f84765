use std::sync::Arc;

use egui::Context as EguiContext;

use crate::controllers::interactive::DisplaySurface;
use crate::core::render::outcome::RenderFailure;
use crate::core::render::ports::waker::UiWaker;

/// A display surface that can draw itself into the window.
pub trait GuiPresenterPort: DisplaySurface {
    fn share_waker(&self) -> Arc<dyn UiWaker>;
    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;
    fn failure(&self) -> Option<&RenderFailure>;
    /// Something changed since the last `render`.
    fn needs_redraw(&self) -> bool;
}
