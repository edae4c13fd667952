//! Pipeline engine
//!
//! Runs the selected steps strictly one after another:
//! 1. Ask the step's builder for its command
//! 2. Hand it to the [`Runner`]
//! 3. Record a [`StepResult`] in the report
//!
//! Steps never run concurrently since every one of them touches the same
//! working tree and index.

mod progress;
mod report;
mod select;

pub use progress::{NoopProgress, ProgressCallback};
pub use report::{Report, StepResult, TOTAL_STEP_NAME};
pub use select::{StepKind, select_steps};

use crate::commands::{Invocation, StepBuilder, command_line};
use crate::error::{Error, Result};
use crate::runner::{Interrupt, Runner};
use crate::settings::Settings;
use crate::types::RunConfig;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// One unit of pipeline work
#[derive(Clone)]
pub struct Step {
    /// Display name
    pub name: String,
    /// Maps the run configuration to this step's command
    pub builder: StepBuilder,
    /// Whether the command runs attached to the terminal
    pub interactive: bool,
}

impl Step {
    /// Create a step
    pub fn new(name: impl Into<String>, builder: StepBuilder, interactive: bool) -> Self {
        Self {
            name: name.into(),
            builder,
            interactive,
        }
    }

    /// The command this step runs for `config`
    pub fn invocation(&self, config: &RunConfig) -> Invocation {
        (self.builder)(config)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Constructed, not started
    Idle,
    /// Steps are executing
    Running,
    /// Every step ran and the report is final
    Completed,
}

/// Ordered steps plus the report they produce
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
    settings: Settings,
    steps: Vec<Step>,
    report: Report,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline, rejecting configurations that cannot run
    pub fn new(config: RunConfig, steps: Vec<Step>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            settings: Settings::default(),
            steps,
            report: Report::new(),
            state: PipelineState::Idle,
        })
    }

    /// Use `settings` instead of the defaults
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The configuration this pipeline runs with
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Current lifecycle state
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Report collected so far
    pub const fn report(&self) -> &Report {
        &self.report
    }

    /// Sum of step weights, used as the progress total
    pub fn total_weight(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| u64::from(step.invocation(&self.config).weight))
            .sum()
    }

    /// Run every step once, in order
    ///
    /// Stops at the first fatal error (a failed command without
    /// continue-on-error, or an interrupt). The pipeline then stays in
    /// `Running` and its report cannot be generated.
    pub async fn run(
        &mut self,
        progress: &dyn ProgressCallback,
        interrupt: &Interrupt,
    ) -> Result<()> {
        if self.state != PipelineState::Idle {
            return Err(Error::Internal("pipeline has already been run".to_string()));
        }
        self.state = PipelineState::Running;

        let names: Vec<&str> = self.steps.iter().map(|s| s.name.as_str()).collect();
        progress.on_pipeline_start(&names, self.total_weight()).await;

        let runner = Runner::new(&self.config, interrupt.clone())
            .with_short_output_limit(self.settings.short_output_limit);
        let started = Instant::now();

        for step in &self.steps {
            if interrupt.is_triggered() {
                return Err(Error::Interrupted);
            }

            progress.on_step_start(&step.name).await;
            let invocation = step.invocation(&self.config);

            let outcome = runner
                .execute(&invocation.argv, step.interactive, progress)
                .await?;
            // Dry runs spawn nothing and take no time
            let duration = outcome.as_ref().map_or(Duration::ZERO, |o| o.duration);

            debug!(step = %step.name, ?duration, "step finished");
            self.report.push(StepResult {
                step: step.name.clone(),
                command: command_line(&invocation.argv),
                duration,
                output: outcome
                    .as_ref()
                    .map(|o| o.combined_output())
                    .unwrap_or_default(),
                exit_code: outcome.and_then(|o| o.exit_code),
            });

            progress.on_step_complete(&step.name, invocation.weight).await;
        }

        self.report.finish(started.elapsed());
        self.state = PipelineState::Completed;
        progress.on_pipeline_complete().await;
        Ok(())
    }

    /// Write the report to `destination`, or print it when there is none
    ///
    /// The file is overwritten, never appended to. Only a completed
    /// pipeline has a report.
    pub async fn generate_report(
        &self,
        destination: Option<&Path>,
        progress: &dyn ProgressCallback,
    ) -> Result<()> {
        if self.state != PipelineState::Completed {
            return Err(Error::Internal(
                "report requested before the pipeline completed".to_string(),
            ));
        }

        let text = self.report.to_string();
        match destination {
            Some(path) => {
                tokio::fs::write(path, text).await?;
                debug!(path = %path.display(), "report written");
                progress
                    .on_message(&format!("report saved to {}", path.display()))
                    .await;
            }
            None => {
                for line in text.lines() {
                    progress.on_message(line).await;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunConfig {
        RunConfig {
            message: Some("x".to_string()),
            dry_run: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_missing_message() {
        let config = RunConfig::default();
        let steps = select_steps(&RunConfig {
            message: Some("x".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            Pipeline::new(config, steps),
            Err(Error::MissingMessage)
        ));
    }

    #[test]
    fn test_total_weight() {
        let config = config();
        let steps = select_steps(&config);
        let pipeline = Pipeline::new(config, steps).unwrap();
        assert_eq!(pipeline.total_weight(), 3);
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_dry_run_completes_and_records_commands() {
        let config = config();
        let steps = select_steps(&config);
        let mut pipeline = Pipeline::new(config, steps).unwrap();
        pipeline.run(&NoopProgress, &Interrupt::new()).await.unwrap();

        assert_eq!(pipeline.state(), PipelineState::Completed);
        let commands: Vec<&str> = pipeline
            .report()
            .steps()
            .iter()
            .map(|r| r.command.as_str())
            .collect();
        assert_eq!(commands, vec!["git add .", "git commit -m x", "git push"]);
        assert!(pipeline.report().steps().iter().all(|r| r.exit_code.is_none()));
        assert!(
            pipeline
                .report()
                .steps()
                .iter()
                .all(|r| r.duration == Duration::ZERO)
        );
        assert!(pipeline.report().is_finished());
    }

    #[tokio::test]
    async fn test_run_twice_is_error() {
        let config = config();
        let steps = select_steps(&config);
        let mut pipeline = Pipeline::new(config, steps).unwrap();
        pipeline.run(&NoopProgress, &Interrupt::new()).await.unwrap();
        assert!(matches!(
            pipeline.run(&NoopProgress, &Interrupt::new()).await,
            Err(Error::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_report_requires_completion() {
        let config = config();
        let steps = select_steps(&config);
        let pipeline = Pipeline::new(config, steps).unwrap();
        assert!(pipeline.generate_report(None, &NoopProgress).await.is_err());
    }
}
