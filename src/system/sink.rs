// src/system/sink.rs

//! Status output for the runner and the pipeline driver.
//!
//! Everything user-facing goes through an [`OutputSink`] that is passed in
//! explicitly, so tests can capture the exact lines instead of scraping a
//! terminal.

use crate::{core::color, models::Style};
use std::sync::{Mutex, PoisonError};

/// A line-oriented status stream.
pub trait OutputSink: std::fmt::Debug + Send + Sync {
    fn write_line(&self, text: &str, style: Style);
}

/// Writes coloured lines to the process stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl OutputSink for TerminalSink {
    fn write_line(&self, text: &str, style: Style) {
        println!("{}", color::paint(text, style));
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct BufferedSink {
    lines: Mutex<Vec<(String, Style)>>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(String, Style)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the text of every line, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|(text, _)| text).collect()
    }
}

impl OutputSink for BufferedSink {
    fn write_line(&self, text: &str, style: Style) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((text.to_string(), style));
    }
}
