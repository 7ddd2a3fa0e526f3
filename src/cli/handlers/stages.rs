// src/cli/handlers/stages.rs

use super::commons;
use crate::{cli::args::StagesArgs, models::Style, stages};
use anyhow::Result;

/// Lists the stages `init` can run, in order.
pub fn handle(args: StagesArgs) -> Result<()> {
    let (_, stage_list) = commons::load_stages(args.config.as_deref())?;
    let sink = commons::terminal_sink();
    for label in stages::stage_labels(&stage_list) {
        sink.write_line(&label, Style::Plain);
    }
    Ok(())
}
