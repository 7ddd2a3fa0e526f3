// src/core/mod.rs

pub mod color;
pub mod config_loader;
pub mod idle;
pub mod paths;
pub mod pipeline;
