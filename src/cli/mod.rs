use clap::{Parser, Subcommand};

pub mod args;
pub mod handlers;

use args::{ArchiveArgs, InitArgs, StagesArgs};

/// tutorial: bootstraps a language-tooling tutorial project, stage by stage.
#[derive(Parser, Debug)]
#[command(
    name = "tutorial",
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initializes the tutorial environment for a given stage.
    Init(InitArgs),
    /// Lists the available stages.
    #[command(alias = "ls")]
    Stages(StagesArgs),
    /// Zips a directory.
    Archive(ArchiveArgs),
}
