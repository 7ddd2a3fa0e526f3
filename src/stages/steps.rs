// src/stages/steps.rs

//! Shell scripts shipped inside the binary. Their body is handed to the
//! runner as the command line.

use crate::{
    models::RunOptions,
    system::{
        executor::CommandRunner,
        fs_ops::FsError,
    },
};
use anyhow::Result;

pub const INSTALL_YO: &str = "00-install-yo.sh";
pub const INSTALL_LANGIUM: &str = "01-install-langium.sh";
pub const RUN_LANGIUM_CLI: &str = "02-run-langium-cli.sh";
pub const MOVE_TO_ROOT_FOLDER: &str = "03-move-to-root-folder.sh";

static STEP_SCRIPTS: &[(&str, &str)] = &[
    (INSTALL_YO, include_str!("steps/00-install-yo.sh")),
    (INSTALL_LANGIUM, include_str!("steps/01-install-langium.sh")),
    (RUN_LANGIUM_CLI, include_str!("steps/02-run-langium-cli.sh")),
    (MOVE_TO_ROOT_FOLDER, include_str!("steps/03-move-to-root-folder.sh")),
];

/// Returns the body of an embedded step script.
pub fn step_script(name: &str) -> Result<&'static str, FsError> {
    STEP_SCRIPTS
        .iter()
        .find(|(script, _)| *script == name)
        .map(|(_, body)| *body)
        .ok_or_else(|| FsError::UnknownScript(name.to_string()))
}

/// Runs an embedded step script through the runner.
pub async fn run_script(
    runner: &CommandRunner,
    title: &str,
    name: &str,
    options: &RunOptions,
) -> Result<String> {
    let body = step_script(name)?;
    Ok(runner.run(title, body, options).await?)
}
