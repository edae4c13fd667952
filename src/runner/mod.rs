//! Process runner
//!
//! Runs one argument vector as a child process in the current directory.
//! Commands that need the terminal (an editor-based commit, a paged diff)
//! run attached to it; everything else is captured, classified and shown
//! through the [`ProgressCallback`]. Whether a failure ends the run is
//! decided here and nowhere else.

mod classify;
mod interrupt;
mod suggest;

pub use classify::{OutputKind, classify};
pub use interrupt::Interrupt;
pub use suggest::suggest_fix;

use crate::commands::command_line;
use crate::error::{Error, Result};
use crate::pipeline::ProgressCallback;
use crate::settings::DEFAULT_SHORT_OUTPUT_LIMIT;
use crate::types::RunConfig;
use std::borrow::Cow;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, warn};

/// What a finished command left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, absent when the child was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured stdout (empty for interactive commands)
    pub stdout: String,
    /// Captured stderr (empty for interactive commands)
    pub stderr: String,
    /// Time spent waiting on the child, excluding any presentation
    pub duration: Duration,
}

impl CommandOutcome {
    /// Whether the command exited with code 0
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Stdout followed by stderr, trimmed
    ///
    /// Git writes most progress and status lines to stderr, so both matter
    /// when deciding what to show.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim_end();
        let stderr = self.stderr.trim_end();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, _) => stderr.to_string(),
            (_, true) => stdout.to_string(),
            _ => format!("{stdout}\n{stderr}"),
        }
    }
}

/// A failed command, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Command line that failed
    pub command: String,
    /// Exit code, absent when killed by a signal
    pub exit_code: Option<i32>,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Best-effort hint derived from stderr
    pub suggestion: Option<String>,
}

/// Whether `argv` is a `git commit` that will open an editor
pub fn opens_editor<S: AsRef<str>>(argv: &[S]) -> bool {
    let mut args = argv.iter().map(|arg| arg.as_ref());
    if args.next() != Some("git") || args.next() != Some("commit") {
        return false;
    }
    !args.any(|arg| {
        arg == "-m"
            || arg == "-F"
            || arg == "-C"
            || arg == "--no-edit"
            || arg.starts_with("--message")
            || arg.starts_with("--file")
            || arg.starts_with("--reuse-message")
            || (arg.starts_with("-m") && arg.len() > 2)
    })
}

/// Spinner text for a git subcommand
pub fn activity_message<S: AsRef<str>>(argv: &[S]) -> Cow<'static, str> {
    let subcommand = argv.get(1).map_or("", |arg| arg.as_ref());
    let message = match subcommand {
        "log" => "q to exit: ",
        "add" => "staging...",
        "push" => "pushing...",
        "pull" => "pulling...",
        "clone" => "cloning...",
        "fetch" => "fetching...",
        "branch" => "branching...",
        "commit" => "committing...",
        "diff" => "showing diffs...",
        "status" => "checking repo status...",
        _ => return Cow::Owned(format!("executing {}...", command_line(argv))),
    };
    Cow::Borrowed(message)
}

/// Executes commands for one run
pub struct Runner<'a> {
    config: &'a RunConfig,
    interrupt: Interrupt,
    short_output_limit: usize,
}

impl<'a> Runner<'a> {
    /// Create a runner for `config`, stopping when `interrupt` triggers
    pub const fn new(config: &'a RunConfig, interrupt: Interrupt) -> Self {
        Self {
            config,
            interrupt,
            short_output_limit: DEFAULT_SHORT_OUTPUT_LIMIT,
        }
    }

    /// Override the short-message cutoff used for classification
    #[must_use]
    pub fn with_short_output_limit(mut self, limit: usize) -> Self {
        self.short_output_limit = limit;
        self
    }

    /// Run `argv`
    ///
    /// Returns `Ok(None)` for an empty argv and for dry runs (nothing was
    /// executed). A nonzero exit is `Ok(Some(..))` when continuing on
    /// errors and [`Error::CommandFailed`] otherwise.
    pub async fn execute(
        &self,
        argv: &[String],
        interactive: bool,
        progress: &dyn ProgressCallback,
    ) -> Result<Option<CommandOutcome>> {
        let Some((program, args)) = argv.split_first() else {
            return Ok(None);
        };
        let line = command_line(argv);

        if self.config.dry_run {
            progress.on_command(&line, true).await;
            return Ok(None);
        }

        if self.interrupt.is_triggered() {
            return Err(Error::Interrupted);
        }

        progress.on_command(&line, false).await;

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);

        let interactive = interactive || opens_editor(argv);
        debug!(command = %line, interactive, "running command");

        let outcome = if interactive {
            self.run_attached(command, &line, progress).await?
        } else {
            self.run_captured(command, argv, &line, progress).await?
        };

        if outcome.success() {
            if !interactive {
                progress.on_output(&self.present(&outcome)).await;
            }
            progress.on_success().await;
            return Ok(Some(outcome));
        }

        self.handle_failure(line, outcome, progress).await
    }

    async fn run_attached(
        &self,
        mut command: Command,
        line: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<CommandOutcome> {
        progress.on_interactive(true).await;
        let started = Instant::now();
        let status = self.until_interrupted(command.status()).await;
        let duration = started.elapsed();
        progress.on_interactive(false).await;

        let status = status?.map_err(|source| Error::Spawn {
            command: line.to_string(),
            source,
        })?;

        Ok(CommandOutcome {
            exit_code: status.code(),
            duration,
            ..Default::default()
        })
    }

    async fn run_captured(
        &self,
        mut command: Command,
        argv: &[String],
        line: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<CommandOutcome> {
        progress.on_activity_start(&activity_message(argv)).await;
        let started = Instant::now();
        let output = self.until_interrupted(command.output()).await;
        let duration = started.elapsed();
        progress.on_activity_stop().await;

        let output = output?.map_err(|source| Error::Spawn {
            command: line.to_string(),
            source,
        })?;

        Ok(CommandOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration,
        })
    }

    /// Race `work` against the interrupt flag; losing drops (and so kills)
    /// the child
    async fn until_interrupted<F, T>(&self, work: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            out = work => Ok(out),
            () = self.interrupt.triggered() => Err(Error::Interrupted),
        }
    }

    fn present(&self, outcome: &CommandOutcome) -> OutputKind {
        let text = outcome.combined_output();
        if self.config.verbose {
            if text.is_empty() {
                return OutputKind::Empty;
            }
            return OutputKind::Verbatim(text);
        }
        classify(&text, self.short_output_limit, self.config.message())
    }

    async fn handle_failure(
        &self,
        line: String,
        outcome: CommandOutcome,
        progress: &dyn ProgressCallback,
    ) -> Result<Option<CommandOutcome>> {
        let failure = CommandFailure {
            command: line,
            exit_code: outcome.exit_code,
            stdout: outcome.stdout.clone(),
            stderr: outcome.stderr.clone(),
            suggestion: suggest_fix(&outcome.stderr),
        };
        progress.on_failure(&failure).await;

        if self.config.continue_on_error {
            warn!(command = %failure.command, code = ?failure.exit_code, "command failed, continuing");
            progress.on_continue().await;
            return Ok(Some(outcome));
        }

        Err(Error::CommandFailed {
            command: failure.command,
            code: failure.exit_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NoopProgress;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_opens_editor() {
        assert!(opens_editor(&["git", "commit"]));
        assert!(opens_editor(&["git", "commit", "--amend"]));
        assert!(opens_editor(&["git", "commit", "--allow-empty-message"]));
        assert!(!opens_editor(&["git", "commit", "-m", "msg"]));
        assert!(!opens_editor(&["git", "commit", "-mmsg"]));
        assert!(!opens_editor(&["git", "commit", "--message=msg"]));
        assert!(!opens_editor(&["git", "commit", "--amend", "--no-edit"]));
        assert!(!opens_editor(&["git", "push"]));
        assert!(!opens_editor(&["commit"]));
    }

    #[test]
    fn test_activity_messages() {
        assert_eq!(activity_message(&["git", "push"]), "pushing...");
        assert_eq!(activity_message(&["git", "add", "."]), "staging...");
        assert_eq!(
            activity_message(&["git", "stash"]),
            "executing git stash..."
        );
    }

    #[test]
    fn test_combined_output() {
        let outcome = CommandOutcome {
            exit_code: Some(0),
            stdout: "out\n".into(),
            stderr: "err\n".into(),
            ..Default::default()
        };
        assert_eq!(outcome.combined_output(), "out\nerr");

        let only_err = CommandOutcome {
            stderr: "Everything up-to-date\n".into(),
            ..Default::default()
        };
        assert_eq!(only_err.combined_output(), "Everything up-to-date");
    }

    #[tokio::test]
    async fn test_dry_run_never_spawns() {
        let config = RunConfig {
            dry_run: true,
            ..Default::default()
        };
        let runner = Runner::new(&config, Interrupt::new());
        let result = runner
            .execute(&argv(&["definitely-not-a-real-binary-xyz"]), false, &NoopProgress)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_argv_is_noop() {
        let config = RunConfig::default();
        let runner = Runner::new(&config, Interrupt::new());
        assert!(runner.execute(&[], false, &NoopProgress).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let config = RunConfig::default();
        let runner = Runner::new(&config, Interrupt::new());
        let err = runner
            .execute(&argv(&["definitely-not-a-real-binary-xyz"]), false, &NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_is_fatal_without_continue() {
        let config = RunConfig::default();
        let runner = Runner::new(&config, Interrupt::new());
        let err = runner
            .execute(&argv(&["sh", "-c", "exit 3"]), false, &NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(3), .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_continues_when_asked() {
        let config = RunConfig {
            continue_on_error: true,
            ..Default::default()
        };
        let runner = Runner::new(&config, Interrupt::new());
        let outcome = runner
            .execute(
                &argv(&["sh", "-c", "echo oops >&2; exit 4"]),
                false,
                &NoopProgress,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.exit_code, Some(4));
        assert_eq!(outcome.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_already_interrupted_does_not_spawn() {
        let config = RunConfig::default();
        let interrupt = Interrupt::new();
        interrupt.trigger();
        let runner = Runner::new(&config, interrupt);
        let err = runner
            .execute(&argv(&["true"]), false, &NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Interrupted));
    }
}
