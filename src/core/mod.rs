pub mod data;
pub mod gesture;
pub mod render;
