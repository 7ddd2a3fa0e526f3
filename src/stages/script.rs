// src/stages/script.rs

use super::{Reporter, StageContext};
use crate::models::{ReportLevel, StageConfig};
use anyhow::Result;

/// A stage declared in `config.toml`: required paths, commands and checks.
#[derive(Debug, Clone)]
pub struct ScriptStage {
    config: StageConfig,
}

impl ScriptStage {
    pub fn new(config: StageConfig) -> Self {
        Self { config }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Reports every missing required path.
    pub async fn before(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        let mut satisfied = true;
        for required in &self.config.requires {
            if !ctx.workdir().join(required).exists() {
                reporter.report(
                    ReportLevel::Warn,
                    &format!(t!("script.warn.missing_path"), path = required),
                );
                satisfied = false;
            }
        }
        Ok(satisfied)
    }

    /// Runs the steps in order. The first failing step aborts the stage.
    pub async fn initialize(&self, ctx: &StageContext) -> Result<bool> {
        for step in &self.config.steps {
            ctx.runner.run(&step.title, &step.run, &step.options()).await?;
        }
        Ok(true)
    }

    /// Runs every check, reporting failures instead of propagating them.
    pub async fn after(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        let mut passed = true;
        for check in &self.config.checks {
            if let Err(e) = ctx.runner.run(&check.title, &check.run, &check.options()).await {
                reporter.report(ReportLevel::Err, &e.to_string());
                passed = false;
            }
        }
        Ok(passed)
    }
}
