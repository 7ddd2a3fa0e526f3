// src/cli/handlers/commons.rs

// Shared helpers for the handlers.

use crate::{
    constants::INTERRUPTED_EXIT_CODE,
    core::config_loader,
    models::{Style, TutorialConfig},
    stages::{self, Stage},
    system::{
        archive,
        sink::{OutputSink, TerminalSink},
    },
};
use anyhow::{Result, anyhow};
use dialoguer::{Select, theme::ColorfulTheme};
use std::{io, path::Path, sync::Arc};

/// The sink every handler prints through.
pub fn terminal_sink() -> Arc<dyn OutputSink> {
    Arc::new(TerminalSink)
}

/// Loads the config and builds the stage list from it.
pub fn load_stages(config_path: Option<&Path>) -> Result<(TutorialConfig, Vec<Stage>)> {
    let config = config_loader::load_config(config_path)?;
    let stage_list = stages::tutorial_stages(&config);
    Ok((config, stage_list))
}

/// Shows the stage menu and returns the chosen index.
///
/// The menu blocks the runtime thread, so the signal task cannot see a
/// Ctrl+C here; an interrupted prompt exits with the same code instead.
pub fn choose_stage(stage_list: &[Stage], sink: &dyn OutputSink) -> Result<usize> {
    let items = stages::stage_labels(stage_list);
    let selection = match Select::with_theme(&ColorfulTheme::default())
        .items(&items)
        .default(0)
        .interact()
    {
        Ok(index) => index,
        Err(e) if is_interrupted(&e) => {
            log::debug!("Stage menu interrupted, exiting.");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => return Err(e.into()),
    };
    let selected = items
        .get(selection)
        .ok_or_else(|| anyhow!("Invalid menu selection: {}", selection))?;
    sink.write_line(
        &format!(t!("menu.selected"), text = selected),
        Style::Info,
    );
    Ok(selection)
}

fn is_interrupted(error: &dialoguer::Error) -> bool {
    matches!(error, dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted)
}

/// Zips `source` into `dest` and prints a one-line summary.
pub fn archive_directory(source: &Path, dest: &Path, sink: &dyn OutputSink) -> Result<()> {
    let count = archive::zip_directory(source, dest)?;
    sink.write_line(
        &format!(
            t!("archive.success"),
            count = count,
            path = dest.display()
        ),
        Style::Success,
    );
    Ok(())
}
