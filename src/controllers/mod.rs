pub mod cli;
pub mod interactive;
