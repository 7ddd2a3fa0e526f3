// src/cli/handlers/init.rs

use super::commons;
use crate::{
    cli::args::InitArgs,
    core::{config_loader, paths, pipeline},
    models::Style,
    stages::{self, SinkReporter, StageContext},
    system::executor::CommandRunner,
};
use anyhow::Result;
use std::sync::Arc;

/// The main handler for the `init` command.
/// Runs every stage up to the requested one inside the output directory.
pub async fn handle(args: InitArgs) -> Result<()> {
    // 1. Settings, stages and the output directory.
    let (config, stage_list) = commons::load_stages(args.config.as_deref())?;
    let workdir = paths::resolve_output_dir(&args.out)?;
    log::debug!("Output directory: {}", workdir.display());

    let sink = commons::terminal_sink();
    let runner = CommandRunner::new(&workdir, sink.clone())
        .with_policy(Arc::new(config_loader::idle_policy(&config)));
    let ctx = StageContext::new(runner);

    // 2. Pick the last stage to run, asking when the argument does not name one.
    let requested = args
        .stage
        .as_deref()
        .and_then(|id| stages::find_stage_index(&stage_list, id));
    let max_index = match requested {
        Some(index) => index,
        None => {
            if let Some(id) = &args.stage {
                log::warn!("Unknown stage '{}'", id);
            }
            sink.write_line(t!("init.no_stage_selected"), Style::Info);
            commons::choose_stage(&stage_list, sink.as_ref())?
        }
    };

    // 3. Run the pipeline.
    sink.write_line(t!("init.bootstrapping"), Style::Info);
    sink.write_line("", Style::Plain);
    let reporter = SinkReporter::new(sink.clone());
    pipeline::run_pipeline(&stage_list, max_index, &ctx, &reporter).await?;

    // 4. Optional archive of the result.
    if let Some(file) = &args.archive {
        commons::archive_directory(&workdir, file, sink.as_ref())?;
    }

    Ok(())
}
