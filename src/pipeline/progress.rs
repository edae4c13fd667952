//! Progress callback trait for interface-agnostic updates
//!
//! The pipeline and the process runner never print. Everything the user
//! sees goes through this trait, so the CLI can draw bars and spinners while
//! tests simply record the calls.

use crate::runner::{CommandFailure, OutputKind};
use async_trait::async_trait;

/// Progress callback trait
///
/// Implementations must tolerate `on_activity_stop` without a matching
/// start, and `on_interactive(false)` without a preceding `true`.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called once before the first step with the step names and the sum of
    /// their weights
    async fn on_pipeline_start(&self, steps: &[&str], total_weight: u64);

    /// Called when a step begins
    async fn on_step_start(&self, step: &str);

    /// Called with the command line about to run (or only shown, on a dry
    /// run)
    async fn on_command(&self, command_line: &str, dry_run: bool);

    /// Called right before a captured command starts; show an activity
    /// indicator
    async fn on_activity_start(&self, message: &str);

    /// Called once the captured command returned; the indicator must be
    /// fully stopped when this returns
    async fn on_activity_stop(&self);

    /// Called around commands that take over the terminal: `true` before,
    /// `false` after
    async fn on_interactive(&self, active: bool);

    /// Called with the classified output of a successful command
    async fn on_output(&self, output: &OutputKind);

    /// Called when a command succeeded
    async fn on_success(&self);

    /// Called when a command exited nonzero
    async fn on_failure(&self, failure: &CommandFailure);

    /// Called when a failure is ignored because of continue-on-error
    async fn on_continue(&self);

    /// Called when a step finished, with its weight
    async fn on_step_complete(&self, step: &str, weight: u32);

    /// Called after the last step
    async fn on_pipeline_complete(&self);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_pipeline_start(&self, _steps: &[&str], _total_weight: u64) {}
    async fn on_step_start(&self, _step: &str) {}
    async fn on_command(&self, _command_line: &str, _dry_run: bool) {}
    async fn on_activity_start(&self, _message: &str) {}
    async fn on_activity_stop(&self) {}
    async fn on_interactive(&self, _active: bool) {}
    async fn on_output(&self, _output: &OutputKind) {}
    async fn on_success(&self) {}
    async fn on_failure(&self, _failure: &CommandFailure) {}
    async fn on_continue(&self) {}
    async fn on_step_complete(&self, _step: &str, _weight: u32) {}
    async fn on_pipeline_complete(&self) {}
    async fn on_message(&self, _message: &str) {}
}
