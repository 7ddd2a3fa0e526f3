// src/core/paths.rs

use crate::{
    constants::{CONFIG_DIR_NAME, CONFIG_FILENAME},
    system::fs_ops,
};
use anyhow::{Context, Result, anyhow};
use std::{env, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
}

/// Returns the tutor configuration directory (`~/.config/tutorial` on Linux).
/// The directory is not created.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or(PathError::ConfigDirNotFound)
}

/// Returns the path of the default `config.toml`.
pub fn get_default_config_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`) in a user-supplied path.
pub fn expand_path(template: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(template)
        .map_err(|e| anyhow!("Failed to expand path '{}': {}", template, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Resolves the `--out` directory: expands it, makes it absolute, creates it
/// when missing and returns the simplified canonical path.
pub fn resolve_output_dir(raw: &str) -> Result<PathBuf> {
    let expanded = expand_path(raw)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()?.join(expanded)
    };
    fs_ops::ensure_dir(&absolute)?;
    dunce::canonicalize(&absolute)
        .with_context(|| format!("Could not resolve output directory '{}'", absolute.display()))
}
