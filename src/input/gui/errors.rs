use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixels surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("could not resize surface: {0}")]
    Texture(#[from] pixels::TextureError),
}
