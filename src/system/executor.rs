// src/system/executor.rs

use crate::{
    core::idle::{IdlePolicy, PromptFeeder, SilenceThreshold, TickAction},
    models::{RunOptions, Style},
    system::{shell, sink::OutputSink},
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::ChildStdin,
    time::{self, MissedTickBehavior},
};

/// Why a [`CommandRunner::run`] call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The shell could not run the command, or the command exited unsuccessfully.
    #[error("{0}")]
    Launch(String),
    /// The command wrote to stderr and the caller did not ask to ignore it.
    #[error("{0}")]
    Stderr(String),
}

/// Runs host-shell commands, answering interactive prompts from a script.
///
/// One subprocess per [`run`](Self::run) call. Stdout is captured, and
/// whenever it has been quiet for long enough (see [`IdlePolicy`]) the next
/// scripted answer is written to stdin. Stdin is closed once the answers run
/// out or stdout closes.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    cwd: PathBuf,
    env_vars: HashMap<String, String>,
    sink: Arc<dyn OutputSink>,
    policy: Arc<dyn IdlePolicy>,
}

impl CommandRunner {
    /// A runner spawning commands in `cwd`, with the default silence threshold.
    pub fn new(cwd: impl Into<PathBuf>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            cwd: cwd.into(),
            env_vars: HashMap::new(),
            sink,
            policy: Arc::new(SilenceThreshold::default()),
        }
    }

    /// Replaces the idle detection used to time prompt answers.
    pub fn with_policy(mut self, policy: Arc<dyn IdlePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Adds an environment variable for every command spawned by this runner.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Working directory of every spawned command.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Where status lines are written.
    pub fn sink(&self) -> &Arc<dyn OutputSink> {
        &self.sink
    }

    /// Runs `command` and returns its stdout, printing a status line before and after.
    pub async fn run(
        &self,
        title: &str,
        command: &str,
        options: &RunOptions,
    ) -> Result<String, ExecutionError> {
        self.sink
            .write_line(&format!(t!("runner.start"), title = title), Style::Success);

        match self.execute(command, options).await {
            Ok(stdout) => {
                self.sink.write_line(t!("runner.done"), Style::Success);
                Ok(stdout)
            }
            Err(e) => {
                let header = match &e {
                    ExecutionError::Launch(_) => t!("runner.failed_error"),
                    ExecutionError::Stderr(_) => t!("runner.failed_stderr"),
                };
                self.sink.write_line(&format!("{}\n{}", header, e), Style::Error);
                Err(e)
            }
        }
    }

    async fn execute(&self, command: &str, options: &RunOptions) -> Result<String, ExecutionError> {
        log::debug!("Spawning '{}' in {}", command, self.cwd.display());

        let mut child = shell::shell_command(command, &self.cwd, &self.env_vars)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ExecutionError::Launch(format!("Command '{}' could not be executed: {}", command, e))
            })?;

        let mut stdin = child.stdin.take();
        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            return Err(ExecutionError::Launch(format!(
                "Command '{}' started without captured output pipes",
                command
            )));
        };

        let mut feeder = PromptFeeder::new(&options.prompt_answers, Instant::now());
        // A zero period would make the interval panic.
        let period = self.policy.poll_interval().max(Duration::from_millis(1));
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut captured_out = Vec::new();
        let mut captured_err = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;

        // The exit status is only collected once both output pipes reached EOF,
        // so nothing written right before exit is lost.
        let waited = loop {
            tokio::select! {
                read = stdout.read_buf(&mut captured_out), if stdout_open => match read {
                    Ok(0) => {
                        stdout_open = false;
                        feeder.on_output_closed();
                    }
                    Ok(_) => feeder.on_output(Instant::now()),
                    Err(e) => {
                        log::debug!("Reading stdout of '{}' failed: {}", command, e);
                        stdout_open = false;
                        feeder.on_output_closed();
                    }
                },
                read = stderr.read_buf(&mut captured_err), if stderr_open => match read {
                    Ok(0) => stderr_open = false,
                    Ok(_) => {}
                    Err(e) => {
                        log::debug!("Reading stderr of '{}' failed: {}", command, e);
                        stderr_open = false;
                    }
                },
                _ = ticker.tick(), if stdin.is_some() => {
                    match feeder.on_tick(Instant::now(), self.policy.as_ref()) {
                        TickAction::Idle => {}
                        TickAction::Answer(answer) => {
                            if let Some(pipe) = stdin.as_mut() {
                                write_answer(pipe, answer).await;
                            }
                        }
                        TickAction::CloseInput => {
                            log::debug!(
                                "Closing stdin of '{}' after {} answer(s)",
                                command,
                                feeder.answers_sent()
                            );
                            stdin = None;
                        }
                    }
                }
                status = child.wait(), if !stdout_open && !stderr_open => break status,
            }
        };
        drop(stdin);

        let status = waited.map_err(|e| {
            ExecutionError::Launch(format!("Waiting for '{}' failed: {}", command, e))
        })?;
        log::debug!("'{}' exited with {}", command, status);

        let stdout_text = String::from_utf8_lossy(&captured_out).into_owned();
        let stderr_text = String::from_utf8_lossy(&captured_err).into_owned();
        settle(command, status, stdout_text, stderr_text, options.ignore_stderr)
    }
}

async fn write_answer(pipe: &mut ChildStdin, answer: &str) {
    log::debug!("Answering prompt with '{}'", answer);
    let line = format!("{}\n", answer);
    if let Err(e) = pipe.write_all(line.as_bytes()).await {
        log::debug!("Could not write answer to stdin: {}", e);
        return;
    }
    if let Err(e) = pipe.flush().await {
        log::debug!("Could not flush stdin: {}", e);
    }
}

/// Turns the finished process into the runner outcome.
fn settle(
    command: &str,
    status: ExitStatus,
    stdout: String,
    stderr: String,
    ignore_stderr: bool,
) -> Result<String, ExecutionError> {
    if !status.success() {
        let mut message = format!("Command failed: {}", command);
        if !stderr.is_empty() {
            message.push('\n');
            message.push_str(&stderr);
        }
        return Err(ExecutionError::Launch(message));
    }
    if !ignore_stderr && !stderr.is_empty() {
        return Err(ExecutionError::Stderr(stderr));
    }
    Ok(stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::system::sink::BufferedSink;

    fn fast_policy() -> Arc<dyn IdlePolicy> {
        Arc::new(SilenceThreshold {
            idle: Duration::from_millis(200),
            poll: Duration::from_millis(20),
        })
    }

    fn runner(sink: &Arc<BufferedSink>) -> CommandRunner {
        CommandRunner::new(".", sink.clone()).with_policy(fast_policy())
    }

    #[tokio::test]
    async fn test_resolves_with_stdout() {
        let sink = Arc::new(BufferedSink::new());
        let out = runner(&sink)
            .run("t", "printf ok", &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(out, "ok");
        assert_eq!(sink.texts(), vec!["> t...", "done"]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_launch_error() {
        let sink = Arc::new(BufferedSink::new());
        let err = runner(&sink)
            .run("t", "exit 1", &RunOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, ExecutionError::Launch("Command failed: exit 1".to_string()));
        let (last, style) = sink.lines().pop().unwrap();
        assert!(last.starts_with("failed error"));
        assert_eq!(style, Style::Error);
    }

    #[tokio::test]
    async fn test_unknown_program_carries_stderr_in_launch_error() {
        let sink = Arc::new(BufferedSink::new());
        let err = runner(&sink)
            .run("t", "definitely-not-a-program-xyz", &RunOptions::default())
            .await
            .unwrap_err();
        assert!(
            matches!(&err, ExecutionError::Launch(message)
                if message.starts_with("Command failed: definitely-not-a-program-xyz\n")),
            "unexpected error: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_launch_error() {
        let sink = Arc::new(BufferedSink::new());
        let err = CommandRunner::new("/definitely/not/here", sink.clone())
            .run("t", "true", &RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Launch(_)));
    }

    #[tokio::test]
    async fn test_stderr_fails_even_with_zero_exit() {
        let sink = Arc::new(BufferedSink::new());
        let err = runner(&sink)
            .run("t", "echo out; echo boom >&2", &RunOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, ExecutionError::Stderr("boom\n".to_string()));
        assert!(sink.texts().last().unwrap().starts_with("failed stderr"));
    }

    #[tokio::test]
    async fn test_ignore_stderr_returns_stdout() {
        let sink = Arc::new(BufferedSink::new());
        let options = RunOptions::default().ignore_stderr(true);
        let out = runner(&sink)
            .run("t", "echo out; echo warn >&2", &options)
            .await
            .unwrap();
        assert_eq!(out, "out\n");
    }

    #[tokio::test]
    async fn test_answers_prompt_after_default_idle_threshold() {
        let sink = Arc::new(BufferedSink::new());
        let started = Instant::now();
        let out = CommandRunner::new(".", sink.clone())
            .run(
                "t",
                "read line; echo \"got $line\"",
                &RunOptions::with_answers(["hello"]),
            )
            .await
            .unwrap();
        assert!(out.contains("hello"));
        assert!(started.elapsed() > Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_each_idle_period_gets_the_next_answer() {
        let sink = Arc::new(BufferedSink::new());
        let out = runner(&sink)
            .run("t", "cat", &RunOptions::with_answers(["a", "b"]))
            .await
            .unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[tokio::test]
    async fn test_stdin_closed_without_answers() {
        let sink = Arc::new(BufferedSink::new());
        let out = runner(&sink)
            .run("t", "cat", &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_closed_stdout_stops_answers() {
        let sink = Arc::new(BufferedSink::new());
        let err = runner(&sink)
            .run(
                "t",
                "exec 1>&-; read line; echo \"got $line\" >&2",
                &RunOptions::with_answers(["x"]),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ExecutionError::Stderr("got \n".to_string()));
    }

    #[tokio::test]
    async fn test_env_vars_reach_the_command() {
        let sink = Arc::new(BufferedSink::new());
        let out = runner(&sink)
            .with_env("TUTORIAL_TEST_VALUE", "42")
            .run("t", "printf \"$TUTORIAL_TEST_VALUE\"", &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(out, "42");
    }
}
