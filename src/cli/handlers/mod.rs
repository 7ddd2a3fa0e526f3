// src/cli/handlers/mod.rs

// One module per CLI action.

pub mod archive;
pub mod commons;
pub mod init;
pub mod stages;
