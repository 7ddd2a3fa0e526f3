// src/models.rs

use crate::constants::{
    DEFAULT_FILE_EXTENSION, DEFAULT_IDLE_THRESHOLD, DEFAULT_LANGUAGE_NAME, DEFAULT_POLL_INTERVAL,
    DEFAULT_PROJECT_NAME,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- COMMAND RUNNER MODELS ---

/// Per-invocation options for [`crate::system::executor::CommandRunner::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Answers written to the subprocess stdin, one per detected idle period.
    pub prompt_answers: Vec<String>,
    /// When set, text on stderr does not turn a successful run into a failure.
    pub ignore_stderr: bool,
}

impl RunOptions {
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt_answers: answers.into_iter().map(Into::into).collect(),
            ignore_stderr: false,
        }
    }

    pub fn ignore_stderr(mut self, ignore: bool) -> Self {
        self.ignore_stderr = ignore;
        self
    }
}

/// Style hint attached to every line written to an output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Plain,
    /// Pipeline narration.
    Info,
    Success,
    Warning,
    Error,
}

/// Severity used by stage hooks when reporting pre/postcondition problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Warn,
    Err,
}

// --- NPM MODELS ---

/// A single entry of `npm list -g --json`.
///
/// Broken or dangling-link entries carry no version.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PackageVersion {
    pub version: Option<String>,
    pub resolved: Option<String>,
}

/// The subset of `npm list -g --json` the setup stage cares about.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageList {
    pub name: Option<String>,
    /// npm omits the key entirely when nothing is installed globally.
    #[serde(default)]
    pub dependencies: HashMap<String, PackageVersion>,
}

impl PackageList {
    pub fn has(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }
}

// --- `config.toml` MODELS ---

/// Answers given to the Langium generator, in prompt order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorAnswers {
    pub project_name: String,
    pub language_name: String,
    pub file_extension: String,
}

impl Default for GeneratorAnswers {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            language_name: DEFAULT_LANGUAGE_NAME.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }
}

impl GeneratorAnswers {
    pub fn as_prompt_answers(&self) -> Vec<String> {
        vec![
            self.project_name.clone(),
            self.language_name.clone(),
            self.file_extension.clone(),
        ]
    }
}

/// One command of a configured stage.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    pub title: String,
    pub run: String,
    #[serde(default)]
    pub prompt_answers: Vec<String>,
    #[serde(default)]
    pub ignore_stderr: bool,
}

impl StepConfig {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            prompt_answers: self.prompt_answers.clone(),
            ignore_stderr: self.ignore_stderr,
        }
    }
}

/// A tutorial stage declared in `config.toml`, appended after the built-in ones.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub id: String,
    /// Paths (relative to the output directory) that must exist before the stage runs.
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    /// Postcondition commands. Their failures are reported, not fatal.
    #[serde(default)]
    pub checks: Vec<StepConfig>,
}

/// The deserialized `config.toml`. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TutorialConfig {
    pub idle_threshold_ms: u64,
    pub poll_interval_ms: u64,
    pub generator: GeneratorAnswers,
    pub stages: Vec<StageConfig>,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            idle_threshold_ms: u64::try_from(DEFAULT_IDLE_THRESHOLD.as_millis()).unwrap_or(1000),
            poll_interval_ms: u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(100),
            generator: GeneratorAnswers::default(),
            stages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_list_without_dependencies() {
        let list: PackageList = serde_json::from_str(r#"{"name": "lib"}"#).unwrap();
        assert!(list.dependencies.is_empty());
        assert!(!list.has("yo"));
    }

    #[test]
    fn test_package_list_parses_npm_output() {
        let json = r#"{
            "name": "lib",
            "dependencies": {
                "yo": { "version": "4.3.1", "resolved": "https://registry.npmjs.org/yo/-/yo-4.3.1.tgz" },
                "generator-langium": { "version": "3.0.0" }
            }
        }"#;
        let list: PackageList = serde_json::from_str(json).unwrap();
        assert!(list.has("yo"));
        assert!(list.has("generator-langium"));
        assert_eq!(list.dependencies["generator-langium"].resolved, None);
    }

    #[test]
    fn test_package_list_tolerates_broken_entries() {
        let json = r#"{
            "name": "lib",
            "dependencies": {
                "yo": { "version": "4.3.1" },
                "broken": { "invalid": true, "problems": ["x"] }
            }
        }"#;
        let list: PackageList = serde_json::from_str(json).unwrap();
        assert!(list.has("yo"));
        assert!(list.has("broken"));
        assert_eq!(list.dependencies["broken"].version, None);
    }

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config: TutorialConfig = toml::from_str(
            r#"
            idle_threshold_ms = 2500
            [generator]
            language_name = "Calc"
            "#,
        )
        .unwrap();
        assert_eq!(config.idle_threshold_ms, 2500);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(
            config.generator.as_prompt_answers(),
            vec!["ErrorMathTutorial", "Calc", ".errmath"]
        );
        assert!(config.stages.is_empty());
    }

    #[test]
    fn test_config_stage_tables() {
        let config: TutorialConfig = toml::from_str(
            r#"
            [[stages]]
            id = "add grammar"
            requires = ["package.json"]

            [[stages.steps]]
            title = "Scaffold grammar"
            run = "npx langium init"
            prompt_answers = ["y"]

            [[stages.checks]]
            title = "Build"
            run = "npm run build"
            ignore_stderr = true
            "#,
        )
        .unwrap();
        let stage = &config.stages[0];
        assert_eq!(stage.id, "add grammar");
        assert_eq!(stage.requires, vec!["package.json"]);
        assert_eq!(stage.steps[0].options(), RunOptions::with_answers(["y"]));
        assert!(stage.checks[0].options().ignore_stderr);
    }
}
