pub mod frame_blit;
pub mod process_engine;
