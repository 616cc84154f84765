pub mod engine;
pub mod waker;
