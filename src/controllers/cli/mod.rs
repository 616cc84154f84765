mod render_once;

pub use render_once::RenderOnceController;
