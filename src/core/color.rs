// src/core/color.rs

use crate::models::Style;
use colored::{ColoredString, Colorize};

/// Applies the terminal colour associated with a `Style`.
pub fn paint(text: &str, style: Style) -> ColoredString {
    match style {
        Style::Plain => text.normal(),
        Style::Info => text.magenta(),
        Style::Success => text.green(),
        Style::Warning => text.yellow(),
        Style::Error => text.red(),
    }
}
