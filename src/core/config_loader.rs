//! # Config Loader
//!
//! Loads `config.toml`, either from an explicit `--config` path or from the
//! user config directory. A missing default file simply means defaults; a
//! missing explicit file is an error.

use crate::{
    core::{idle::SilenceThreshold, paths},
    models::TutorialConfig,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("'poll_interval_ms' must be greater than zero.")]
    ZeroPollInterval,
    #[error("Duplicate stage id '{0}' in config file.")]
    DuplicateStage(String),
}

/// Loads the configuration, falling back to defaults when no file is found.
pub fn load_config(explicit: Option<&Path>) -> Result<TutorialConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_from_file(path);
    }

    match paths::get_default_config_path() {
        Ok(path) if path.is_file() => load_from_file(&path),
        Ok(path) => {
            log::debug!("No config file at '{}', using defaults.", path.display());
            Ok(TutorialConfig::default())
        }
        Err(e) => {
            log::debug!("{} Using defaults.", e);
            Ok(TutorialConfig::default())
        }
    }
}

pub fn load_from_file(path: &Path) -> Result<TutorialConfig, ConfigError> {
    log::debug!("Loading config from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: TutorialConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &TutorialConfig) -> Result<(), ConfigError> {
    if config.poll_interval_ms == 0 {
        return Err(ConfigError::ZeroPollInterval);
    }
    let mut seen = Vec::with_capacity(config.stages.len());
    for stage in &config.stages {
        if seen.contains(&stage.id.as_str()) {
            return Err(ConfigError::DuplicateStage(stage.id.clone()));
        }
        seen.push(stage.id.as_str());
    }
    Ok(())
}

/// The idle policy described by the config.
pub fn idle_policy(config: &TutorialConfig) -> SilenceThreshold {
    SilenceThreshold {
        idle: Duration::from_millis(config.idle_threshold_ms),
        poll: Duration::from_millis(config.poll_interval_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_explicit_file() {
        let file = config_file("idle_threshold_ms = 1500\npoll_interval_ms = 50\n");
        let config = load_config(Some(file.path())).unwrap();
        let policy = idle_policy(&config);
        assert_eq!(policy.idle, Duration::from_millis(1500));
        assert_eq!(policy.poll, Duration::from_millis(50));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let file = config_file("poll_interval_ms = 0\n");
        assert!(matches!(
            load_from_file(file.path()),
            Err(ConfigError::ZeroPollInterval)
        ));
    }

    #[test]
    fn test_duplicate_stage_ids_are_rejected() {
        let file = config_file(
            "[[stages]]\nid = \"a\"\n[[stages]]\nid = \"a\"\n",
        );
        assert!(matches!(
            load_from_file(file.path()),
            Err(ConfigError::DuplicateStage(id)) if id == "a"
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = config_file("idle_threshold_ms = \"soon\"\n");
        assert!(matches!(
            load_from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_policy_matches_defaults() {
        assert_eq!(
            idle_policy(&TutorialConfig::default()),
            SilenceThreshold::default()
        );
    }
}
