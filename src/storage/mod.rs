pub mod config;
pub mod shortcuts;
