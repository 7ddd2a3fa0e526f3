// src/core/idle.rs

//! Idle detection for interactive subprocesses.
//!
//! Many generator CLIs print a question and then block on stdin without any
//! machine-readable cue. The runner approximates "blocked on a prompt" by
//! watching how long stdout has been silent. The decision is made by an
//! [`IdlePolicy`], and the bookkeeping lives in [`PromptFeeder`], which has no
//! I/O of its own so it can be driven deterministically.
//!
//! The heuristic is racy: a slow command that is not waiting for anything can
//! still receive an answer on its stdin.

use crate::constants::{DEFAULT_IDLE_THRESHOLD, DEFAULT_POLL_INTERVAL};
use std::time::{Duration, Instant};

/// Decides when a silent subprocess is considered to be waiting for input.
pub trait IdlePolicy: std::fmt::Debug + Send + Sync {
    /// How often the feeder should be ticked.
    fn poll_interval(&self) -> Duration;

    /// Whether `silent_for` of stdout silence means the process wants input.
    fn is_waiting_for_input(&self, silent_for: Duration) -> bool;
}

/// Fixed silence window: anything strictly longer than `idle` counts as a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceThreshold {
    pub idle: Duration,
    pub poll: Duration,
}

impl Default for SilenceThreshold {
    fn default() -> Self {
        Self {
            idle: DEFAULT_IDLE_THRESHOLD,
            poll: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl IdlePolicy for SilenceThreshold {
    fn poll_interval(&self) -> Duration {
        self.poll
    }

    fn is_waiting_for_input(&self, silent_for: Duration) -> bool {
        silent_for > self.idle
    }
}

/// What the runner has to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction<'a> {
    /// Nothing to do this tick.
    Idle,
    /// Write this answer (plus a newline) to stdin.
    Answer(&'a str),
    /// Close stdin and stop ticking.
    CloseInput,
}

/// Tracks stdout activity and the cursor into the scripted answers.
#[derive(Debug)]
pub struct PromptFeeder<'a> {
    answers: &'a [String],
    /// `None` once stdout has closed.
    last_output: Option<Instant>,
    next_answer: usize,
    finished: bool,
}

impl<'a> PromptFeeder<'a> {
    /// Starts the idle clock at `started_at`.
    pub fn new(answers: &'a [String], started_at: Instant) -> Self {
        Self {
            answers,
            last_output: Some(started_at),
            next_answer: 0,
            finished: false,
        }
    }

    /// Records a chunk of stdout. Ignored after stdout closed.
    pub fn on_output(&mut self, now: Instant) {
        if self.last_output.is_some() {
            self.last_output = Some(now);
        }
    }

    /// Stdout reached EOF; no further answers will be sent.
    pub fn on_output_closed(&mut self) {
        self.last_output = None;
    }

    /// Number of answers already handed out.
    pub fn answers_sent(&self) -> usize {
        self.next_answer
    }

    /// Whether stdin should stay closed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decides what to do with stdin at this poll tick.
    pub fn on_tick(&mut self, now: Instant, policy: &dyn IdlePolicy) -> TickAction<'a> {
        if self.finished {
            return TickAction::CloseInput;
        }

        let last_output = match self.last_output {
            Some(instant) if self.next_answer < self.answers.len() => instant,
            _ => {
                self.finished = true;
                return TickAction::CloseInput;
            }
        };

        if !policy.is_waiting_for_input(now.saturating_duration_since(last_output)) {
            return TickAction::Idle;
        }

        match self.answers.get(self.next_answer) {
            Some(answer) => {
                self.next_answer += 1;
                TickAction::Answer(answer.as_str())
            }
            None => {
                self.finished = true;
                TickAction::CloseInput
            }
        }
    }
}
