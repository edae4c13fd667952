//! Common test utilities for meower tests

#![allow(dead_code)]

use async_trait::async_trait;
use meower::pipeline::ProgressCallback;
use meower::runner::{CommandFailure, OutputKind};
use std::sync::Mutex;
use std::time::Duration;

/// One callback, as seen by [`RecordingProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PipelineStart(Vec<String>),
    StepStart(String),
    Command { line: String, dry_run: bool },
    Interactive(bool),
    Output(OutputKind),
    Success,
    Failure(Option<i32>),
    Continue,
    StepComplete(String),
    PipelineComplete,
    Message(String),
}

/// Progress callback that records events instead of drawing
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
    delay: Duration,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that takes `delay` to show each command and each success,
    /// like a slow terminal
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Command lines in the order they were announced
    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Command { line, .. } => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_pipeline_start(&self, steps: &[&str], _total_weight: u64) {
        self.record(Event::PipelineStart(
            steps.iter().map(ToString::to_string).collect(),
        ));
    }

    async fn on_step_start(&self, step: &str) {
        self.record(Event::StepStart(step.to_string()));
    }

    async fn on_command(&self, command_line: &str, dry_run: bool) {
        self.record(Event::Command {
            line: command_line.to_string(),
            dry_run,
        });
        self.pause().await;
    }

    async fn on_activity_start(&self, _message: &str) {}

    async fn on_activity_stop(&self) {}

    async fn on_interactive(&self, active: bool) {
        self.record(Event::Interactive(active));
    }

    async fn on_output(&self, output: &OutputKind) {
        self.record(Event::Output(output.clone()));
    }

    async fn on_success(&self) {
        self.record(Event::Success);
        self.pause().await;
    }

    async fn on_failure(&self, failure: &CommandFailure) {
        self.record(Event::Failure(failure.exit_code));
    }

    async fn on_continue(&self) {
        self.record(Event::Continue);
    }

    async fn on_step_complete(&self, step: &str, _weight: u32) {
        self.record(Event::StepComplete(step.to_string()));
    }

    async fn on_pipeline_complete(&self) {
        self.record(Event::PipelineComplete);
    }

    async fn on_message(&self, message: &str) {
        self.record(Event::Message(message.to_string()));
    }
}

/// Whether a usable `git` is on PATH
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}
