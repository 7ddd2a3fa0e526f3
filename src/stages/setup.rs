// src/stages/setup.rs

use super::{Reporter, StageContext, steps};
use crate::{
    constants::PROJECT_ENV_VAR,
    models::{GeneratorAnswers, PackageList, ReportLevel, RunOptions},
    system::fs_ops,
};
use anyhow::{Context, Result};

/// Installs Yeoman and the Langium generator, generates the project into the
/// output directory and builds it.
#[derive(Debug, Clone)]
pub struct SetupStage {
    answers: GeneratorAnswers,
}

impl SetupStage {
    pub fn new(answers: GeneratorAnswers) -> Self {
        Self { answers }
    }

    pub fn id(&self) -> &str {
        "setup Langium"
    }

    /// The generator writes into a fresh folder that is later moved up, so the
    /// output directory has to start out empty.
    pub async fn before(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        let entries = fs_ops::list_dir(ctx.workdir())?;
        if !entries.is_empty() {
            reporter.report(ReportLevel::Err, t!("setup.error.workdir_not_empty"));
            return Ok(false);
        }
        Ok(true)
    }

    pub async fn initialize(&self, ctx: &StageContext) -> Result<bool> {
        let runner = &ctx.runner;
        let listing = runner
            .run(t!("setup.step.check_installed"), "npm list -g --json", &RunOptions::default())
            .await?;
        let installed: PackageList = serde_json::from_str(&listing)
            .context("Could not parse the output of 'npm list -g --json'")?;

        if !installed.has("yo") {
            steps::run_script(
                runner,
                t!("setup.step.install_yo"),
                steps::INSTALL_YO,
                &RunOptions::default(),
            )
            .await?;
        }
        if !installed.has("generator-langium") {
            steps::run_script(
                runner,
                t!("setup.step.install_langium"),
                steps::INSTALL_LANGIUM,
                &RunOptions::default(),
            )
            .await?;
        }

        let generator_options =
            RunOptions::with_answers(self.answers.as_prompt_answers()).ignore_stderr(true);
        steps::run_script(
            runner,
            t!("setup.step.run_generator"),
            steps::RUN_LANGIUM_CLI,
            &generator_options,
        )
        .await?;

        let project_runner = runner
            .clone()
            .with_env(PROJECT_ENV_VAR, self.answers.project_name.as_str());
        steps::run_script(
            &project_runner,
            t!("setup.step.move_files"),
            steps::MOVE_TO_ROOT_FOLDER,
            &RunOptions::default(),
        )
        .await?;
        fs_ops::remove_folder(&ctx.workdir().join(&self.answers.project_name))?;

        runner
            .run(t!("setup.step.npm_install"), "npm install", &RunOptions::default())
            .await?;
        Ok(true)
    }

    /// Generation or build problems are reported, never fatal.
    pub async fn after(&self, ctx: &StageContext, reporter: &dyn Reporter) -> Result<bool> {
        if let Err(e) = self.build(ctx).await {
            reporter.report(ReportLevel::Err, &e.to_string());
        }
        Ok(true)
    }

    async fn build(&self, ctx: &StageContext) -> Result<()> {
        let runner = &ctx.runner;
        runner
            .run(
                t!("setup.step.generate_grammar"),
                "npm run langium:generate",
                &RunOptions::default(),
            )
            .await?;
        runner
            .run(t!("setup.step.build_sources"), "npm run build", &RunOptions::default())
            .await?;
        Ok(())
    }
}
