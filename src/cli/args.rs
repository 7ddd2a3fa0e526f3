// src/cli/args.rs

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// The id of the last stage to run (e.g. "setup Langium"). If missing or
    /// unknown, a menu is shown.
    pub stage: Option<String>,

    /// Output directory. Created when it does not exist.
    #[arg(short = 'o', long = "out", default_value = ".")]
    pub out: String,

    /// Zip the output directory to this file once the stages are done.
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Read settings from this file instead of the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct StagesArgs {
    /// Read settings from this file instead of the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ArchiveArgs {
    /// The directory to archive.
    pub dir: String,

    /// The zip file to write.
    pub file: PathBuf,
}
