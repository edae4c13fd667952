//! CLI progress callback
//!
//! Draws an overall step bar and a per-command spinner with `indicatif`.
//! Lines are printed with the bars suspended so animation never interleaves
//! with output.

use crate::cli::style::{
    Stylize, bar_done_style, bar_failed_style, bar_style, check, cross, spinner_style,
};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use meower::pipeline::ProgressCallback;
use meower::runner::{CommandFailure, OutputKind};
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Progress callback that draws to the terminal
pub struct CliProgress {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
    spinner: Mutex<Option<ProgressBar>>,
    tick: Duration,
}

impl CliProgress {
    /// Create a callback whose spinners advance every `tick`
    pub fn new(tick: Duration) -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
            spinner: Mutex::new(None),
            tick,
        }
    }

    fn line(&self, text: impl Display) {
        self.multi.suspend(|| println!("{text}"));
    }

    fn error_line(&self, text: impl Display) {
        self.multi.suspend(|| eprintln!("{text}"));
    }

    fn info(&self, text: &str) {
        for line in text.lines() {
            self.line(format!("    i {}", line.muted()));
        }
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = lock(&self.spinner).take() {
            spinner.finish_and_clear();
            self.multi.remove(&spinner);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_pipeline_start(&self, steps: &[&str], total_weight: u64) {
        self.line(format!("\n{}", "meows to meow:".accent().emphasis()));
        for (i, step) in steps.iter().enumerate() {
            self.line(format!("  {} {}", format!("{}.", i + 1).accent(), step));
        }
        self.line("");

        let bar = self.multi.add(ProgressBar::new(total_weight));
        bar.set_style(bar_style());
        bar.set_message("meowing...".danger());
        *lock(&self.bar) = Some(bar);
    }

    async fn on_step_start(&self, step: &str) {
        self.line(format!("\n{}", step.accent()));
    }

    async fn on_command(&self, command_line: &str, dry_run: bool) {
        if dry_run {
            self.line(format!("  {}", command_line.accent()));
        } else {
            self.line(format!("    {}", "running command:".muted()));
            self.line(format!("      $ {}", command_line.accent()));
        }
    }

    async fn on_activity_start(&self, message: &str) {
        self.stop_spinner();
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(spinner_style());
        spinner.set_message(message.accent());
        spinner.enable_steady_tick(self.tick);
        *lock(&self.spinner) = Some(spinner);
    }

    async fn on_activity_stop(&self) {
        self.stop_spinner();
    }

    async fn on_interactive(&self, active: bool) {
        if active {
            self.stop_spinner();
            // Nothing may draw while another program owns the terminal
            let _ = self.multi.clear();
            self.multi.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            self.multi.set_draw_target(ProgressDrawTarget::stderr());
        }
    }

    async fn on_output(&self, output: &OutputKind) {
        match output {
            OutputKind::Empty | OutputKind::Suppressed => {}
            OutputKind::UpToDate => self.line(format!("    i {}", "everything up to date".accent())),
            OutputKind::NothingToCommit => {
                self.line(format!("    i {}", "nothing to commit".accent()));
            }
            OutputKind::ModeChanges(lines) => {
                for line in lines {
                    self.info(line);
                }
            }
            OutputKind::Short(text) | OutputKind::Verbatim(text) => self.info(text),
        }
    }

    async fn on_success(&self) {
        self.line(format!("    {} {}", check(), "completed successfully".positive()));
    }

    async fn on_failure(&self, failure: &CommandFailure) {
        if let Some(bar) = lock(&self.bar).as_ref() {
            bar.set_style(bar_failed_style());
        }

        let code = failure
            .exit_code
            .map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"));
        self.error_line(format!(
            "\n{} {}",
            cross(),
            format!("command failed with {code}:").danger()
        ));
        self.error_line(format!("  $ {}", failure.command.accent()));

        let stdout = failure.stdout.trim_end();
        if !stdout.is_empty() {
            self.error_line(stdout.muted());
        }
        let stderr = failure.stderr.trim_end();
        if !stderr.is_empty() {
            self.error_line(stderr.danger());
        }
        if let Some(suggestion) = &failure.suggestion {
            self.error_line(suggestion.caution());
        }
    }

    async fn on_continue(&self) {
        self.line("continuing...".accent());
    }

    async fn on_step_complete(&self, _step: &str, weight: u32) {
        if let Some(bar) = lock(&self.bar).as_ref() {
            bar.inc(u64::from(weight));
        }
    }

    async fn on_pipeline_complete(&self) {
        if let Some(bar) = lock(&self.bar).take() {
            bar.set_style(bar_done_style());
            bar.set_message("meowed".positive());
            bar.finish();
        }
    }

    async fn on_message(&self, message: &str) {
        self.line(message);
    }
}
