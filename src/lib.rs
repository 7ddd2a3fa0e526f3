//! # tutor
//!
//! Library behind the `tutorial` binary: a command runner that answers interactive
//! prompts when a subprocess goes quiet, and a stage pipeline that uses it to
//! bootstrap a language-tooling tutorial project.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod stages;
pub mod system;
