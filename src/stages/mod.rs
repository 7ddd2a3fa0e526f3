// src/stages/mod.rs

//! # Tutorial stages
//!
//! A stage is one step of the tutorial: a precondition check (`before`), the
//! work itself (`initialize`) and a postcondition check (`after`). Stages are a
//! closed set of variants rather than trait objects; each variant carries the
//! data its hooks need. Hooks get the shared [`StageContext`] for running
//! commands and touching the output directory.

pub mod script;
pub mod setup;
pub mod steps;

use crate::{
    models::{ReportLevel, Style, TutorialConfig},
    system::{executor::CommandRunner, sink::OutputSink},
};
use anyhow::Result;
use std::{path::Path, sync::Arc};

pub use script::ScriptStage;
pub use setup::SetupStage;

/// Receives pre/postcondition problems found by stage hooks.
pub trait Reporter {
    fn report(&self, level: ReportLevel, message: &str);
}

impl<F> Reporter for F
where
    F: Fn(ReportLevel, &str),
{
    fn report(&self, level: ReportLevel, message: &str) {
        self(level, message);
    }
}

/// Prints reports as indented lines: warnings in yellow, errors in red.
#[derive(Debug, Clone)]
pub struct SinkReporter {
    sink: Arc<dyn OutputSink>,
}

impl SinkReporter {
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self { sink }
    }
}

impl Reporter for SinkReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        let style = match level {
            ReportLevel::Warn => Style::Warning,
            ReportLevel::Err => Style::Error,
        };
        self.sink.write_line(&format!("    {}", message), style);
    }
}

/// Everything a hook needs besides the reporter.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub runner: CommandRunner,
}

impl StageContext {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    /// The tutorial output directory. Every command runs here.
    pub fn workdir(&self) -> &Path {
        self.runner.cwd()
    }
}

#[derive(Debug, Clone)]
pub enum Stage {
    Setup(SetupStage),
    Script(ScriptStage),
}

impl Stage {
    pub fn id(&self) -> &str {
        match self {
            Self::Setup(stage) => stage.id(),
            Self::Script(stage) => stage.id(),
        }
    }

    pub async fn before(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        match self {
            Self::Setup(stage) => stage.before(ctx, reporter).await,
            Self::Script(stage) => stage.before(ctx, reporter).await,
        }
    }

    pub async fn initialize(&self, ctx: &StageContext) -> Result<bool> {
        match self {
            Self::Setup(stage) => stage.initialize(ctx).await,
            Self::Script(stage) => stage.initialize(ctx).await,
        }
    }

    pub async fn after(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        match self {
            Self::Setup(stage) => stage.after(ctx, reporter).await,
            Self::Script(stage) => stage.after(ctx, reporter).await,
        }
    }
}

/// The tutorial in order: built-in stages first, then the ones from `config.toml`.
pub fn tutorial_stages(config: &TutorialConfig) -> Vec<Stage> {
    let mut stages = vec![Stage::Setup(SetupStage::new(config.generator.clone()))];
    stages.extend(
        config
            .stages
            .iter()
            .cloned()
            .map(|stage| Stage::Script(ScriptStage::new(stage))),
    );
    stages
}

pub fn find_stage_index(stages: &[Stage], id: &str) -> Option<usize> {
    stages.iter().position(|stage| stage.id() == id)
}

/// Menu labels, `"1. setup Langium"` style.
pub fn stage_labels(stages: &[Stage]) -> Vec<String> {
    stages
        .iter()
        .enumerate()
        .map(|(index, stage)| format!("{}. {}", index + 1, stage.id()))
        .collect()
}
