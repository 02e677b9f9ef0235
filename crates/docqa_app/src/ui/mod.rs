pub mod commands;
pub mod picker;
pub mod render;
