// src/core/pipeline.rs

use crate::{
    models::Style,
    stages::{Reporter, Stage, StageContext},
};
use anyhow::{Context, Result};

/// Runs every stage up to and including `max_index`, hook by hook.
///
/// Hook errors abort the run; nothing already done is rolled back. A hook
/// that returns `false` is logged and the run goes on. An index past the end
/// is clamped to the last stage.
pub async fn run_pipeline(
    stages: &[Stage],
    max_index: usize,
    ctx: &StageContext,
    reporter: &dyn Reporter,
) -> Result<()> {
    let sink = ctx.runner.sink();
    let count = max_index.saturating_add(1).min(stages.len());

    for (index, stage) in stages.iter().enumerate().take(count) {
        let id = stage.id();
        sink.write_line(
            &format!(t!("pipeline.stage_header"), number = index + 1, id = id),
            Style::Info,
        );

        sink.write_line(t!("pipeline.checking_preconditions"), Style::Info);
        let ok = stage
            .before(ctx, reporter)
            .await
            .with_context(|| format!("Stage '{}' failed while checking preconditions", id))?;
        warn_if_unsatisfied(ok, id, "preconditions");

        sink.write_line(t!("pipeline.initializing"), Style::Info);
        let ok = stage
            .initialize(ctx)
            .await
            .with_context(|| format!("Stage '{}' failed to initialize", id))?;
        warn_if_unsatisfied(ok, id, "initialization");
        sink.write_line("", Style::Plain);

        sink.write_line(t!("pipeline.checking_postconditions"), Style::Info);
        let ok = stage
            .after(ctx, reporter)
            .await
            .with_context(|| format!("Stage '{}' failed while checking postconditions", id))?;
        warn_if_unsatisfied(ok, id, "postconditions");
        sink.write_line("", Style::Plain);
    }

    log::debug!("Pipeline finished after {} stage(s)", count);
    Ok(())
}

fn warn_if_unsatisfied(ok: bool, id: &str, hook: &str) {
    if !ok {
        log::warn!("Stage '{}' reported unsatisfied {}, continuing.", id, hook);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{
        models::{ReportLevel, StageConfig, StepConfig},
        stages::ScriptStage,
        system::{executor::CommandRunner, sink::BufferedSink},
    };
    use std::{cell::RefCell, sync::Arc};
    use tempfile::tempdir;

    fn script_stage(id: &str, run: &str) -> Stage {
        Stage::Script(ScriptStage::new(StageConfig {
            id: id.to_string(),
            requires: vec!["missing.txt".to_string()],
            steps: vec![StepConfig {
                title: format!("run {}", id),
                run: run.to_string(),
                prompt_answers: vec![],
                ignore_stderr: false,
            }],
            checks: vec![],
        }))
    }

    #[tokio::test]
    async fn test_runs_stages_up_to_index_in_order() {
        let dir = tempdir().unwrap();
        let sink = Arc::new(BufferedSink::new());
        let ctx = StageContext::new(CommandRunner::new(dir.path(), sink.clone()));
        let stages = vec![
            script_stage("one", "touch one"),
            script_stage("two", "touch two"),
            script_stage("three", "touch three"),
        ];
        let reports = RefCell::new(Vec::new());
        let reporter = |level: ReportLevel, message: &str| {
            reports.borrow_mut().push((level, message.to_string()));
        };

        run_pipeline(&stages, 1, &ctx, &reporter).await.unwrap();

        assert!(dir.path().join("one").exists());
        assert!(dir.path().join("two").exists());
        assert!(!dir.path().join("three").exists());
        // Unsatisfied preconditions are reported but do not stop the run.
        assert_eq!(reports.borrow().len(), 2);

        let texts = sink.texts();
        assert_eq!(
            &texts[..7],
            &[
                "< 1. stage: one",
                "  - checking preconditions...",
                "  - initializing stage...",
                "> run one...",
                "done",
                "",
                "  - checking postconditions...",
            ]
        );
        assert!(texts.contains(&"< 2. stage: two".to_string()));
        assert!(!texts.iter().any(|t| t.contains("three")));
    }

    #[tokio::test]
    async fn test_initialize_failure_aborts_the_run() {
        let dir = tempdir().unwrap();
        let sink = Arc::new(BufferedSink::new());
        let ctx = StageContext::new(CommandRunner::new(dir.path(), sink.clone()));
        let stages = vec![script_stage("one", "exit 2"), script_stage("two", "touch two")];
        let reporter = |_: ReportLevel, _: &str| {};

        let err = run_pipeline(&stages, 5, &ctx, &reporter).await.unwrap_err();
        assert_eq!(err.to_string(), "Stage 'one' failed to initialize");
        assert!(!dir.path().join("two").exists());
    }

    #[tokio::test]
    async fn test_index_past_the_end_runs_everything() {
        let dir = tempdir().unwrap();
        let ctx = StageContext::new(CommandRunner::new(dir.path(), Arc::new(BufferedSink::new())));
        let stages = vec![script_stage("one", "touch one")];
        let reporter = |_: ReportLevel, _: &str| {};

        run_pipeline(&stages, usize::MAX, &ctx, &reporter).await.unwrap();
        assert!(dir.path().join("one").exists());
    }
}
