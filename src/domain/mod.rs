pub mod commands;
pub mod matcher;
pub mod offset;
pub mod palette;
pub mod tracker;
