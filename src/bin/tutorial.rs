// src/bin/tutorial.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use tutor::{
    cli::{Cli, Commands, handlers},
    system::signals,
};

/// The main entry point of the `tutorial` application.
/// It sets up logging and signal handling, dispatches to the handler and
/// performs centralized error handling.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    signals::install_exit_handler();

    if let Err(e) = run_cli(Cli::parse()).await {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    match cli.command {
        Commands::Init(args) => handlers::init::handle(args).await,
        Commands::Stages(args) => handlers::stages::handle(args),
        Commands::Archive(args) => handlers::archive::handle(args),
    }
}
