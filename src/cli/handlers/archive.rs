// src/cli/handlers/archive.rs

use super::commons;
use crate::{cli::args::ArchiveArgs, core::paths};
use anyhow::Result;

/// The main handler for the `archive` command.
pub fn handle(args: ArchiveArgs) -> Result<()> {
    let sink = commons::terminal_sink();
    let source = paths::expand_path(&args.dir)?;
    let dest = paths::expand_path(&args.file.to_string_lossy())?;
    commons::archive_directory(&source, &dest, sink.as_ref())
}
