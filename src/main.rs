//! meow - stage, commit and push in one go
//!
//! CLI binary wrapping `git` in a pipeline with progress feedback.

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use meower::runner::Interrupt;
use meower::settings::Settings;
use meower::shortcut::Shortcut;
use meower::types::{RunConfig, Upstream};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "meow")]
#[command(about = "Stage, commit and push with a single command")]
#[command(version, disable_version_flag = true)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Commit message (overrides --no-message)
    message: Vec<String>,

    /// Select specific files to stage
    #[arg(short, long, num_args = 1.., value_name = "PATH")]
    add: Vec<String>,

    /// Show version
    #[arg(short = 'v', long, action = ArgAction::Version, help_heading = "General options")]
    version: (),

    /// Continue after errors
    #[arg(short = 'c', long = "continue", help_heading = "General options")]
    cont: bool,

    /// Suppress git output
    #[arg(short, long, help_heading = "General options")]
    quiet: bool,

    /// Verbose output (also -ve)
    #[arg(long, help_heading = "General options")]
    verbose: bool,

    /// Preview commands without executing them
    #[arg(long, help_heading = "General options")]
    dry: bool,

    /// Show git status before executing commands
    #[arg(long, help_heading = "General options")]
    status: bool,

    /// Allow an empty commit message
    #[arg(short = 'n', long = "no-message", help_heading = "Commit options")]
    no_message: bool,

    /// Allow a commit with no changes
    #[arg(long, help_heading = "Commit options")]
    allow_empty: bool,

    /// Show the staged diff before committing
    #[arg(long, help_heading = "Commit options")]
    diff: bool,

    /// Amend the previous commit
    #[arg(long, help_heading = "Commit options")]
    amend: bool,

    /// Set upstream branch to push to (REMOTE BRANCH or REMOTE/BRANCH)
    #[arg(
        short,
        long,
        visible_alias = "set-upstream",
        num_args = 1..,
        value_name = "REMOTE/BRANCH",
        help_heading = "Push options"
    )]
    upstream: Option<Vec<String>>,

    /// Force push (with lease)
    #[arg(short, long, help_heading = "Push options")]
    force: bool,

    /// Skip pushing (also -np)
    #[arg(long = "no-push", help_heading = "Push options")]
    no_push: bool,

    /// Push tags with commits
    #[arg(long, help_heading = "Push options")]
    tags: bool,

    /// Run git pull before committing
    #[arg(long, help_heading = "Pull options")]
    pull: bool,

    /// Run git pull --no-rebase (overrides --pull)
    #[arg(long = "pull-no-rebase", help_heading = "Pull options")]
    pull_no_rebase: bool,

    /// Update submodules recursively
    #[arg(long, help_heading = "Advanced options")]
    update_submodules: bool,

    /// Stash changes before pull
    #[arg(long, help_heading = "Advanced options")]
    stash: bool,

    /// Print the report instead of saving it
    #[arg(long, help_heading = "Advanced options")]
    report: bool,

    /// Save the report to this file
    #[arg(long, value_name = "PATH", help_heading = "Advanced options")]
    report_file: Option<PathBuf>,
}

impl Cli {
    /// Turn parsed flags into a run configuration, rejecting a malformed
    /// upstream before anything runs
    fn into_run_config(self) -> meower::error::Result<RunConfig> {
        let upstream = self
            .upstream
            .as_deref()
            .map(Upstream::parse)
            .transpose()?;

        let message = Some(self.message.join(" ")).filter(|m| !m.trim().is_empty());

        Ok(RunConfig {
            message,
            add: self.add,
            no_message: self.no_message,
            allow_empty: self.allow_empty,
            amend: self.amend,
            diff: self.diff,
            upstream,
            force: self.force,
            no_push: self.no_push,
            tags: self.tags,
            pull: self.pull,
            pull_no_rebase: self.pull_no_rebase,
            update_submodules: self.update_submodules,
            stash: self.stash,
            report: self.report,
            continue_on_error: self.cont,
            quiet: self.quiet,
            verbose: self.verbose,
            dry_run: self.dry,
            status: self.status,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    cli::init_tracing();

    match run().await {
        Ok(code) => code,
        Err(err) => cli::report_error(&err),
    }
}

async fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        Cli::command().print_help()?;
        cli::print_current_dir();
        return Ok(ExitCode::FAILURE);
    }
    if args == ["meow"] {
        cli::print_greeting();
        return Ok(ExitCode::SUCCESS);
    }

    let interrupt = Interrupt::listen_for_ctrl_c()?;

    if let Some(shortcut) = Shortcut::parse(&args) {
        // `log` never looks at settings, so a broken file must not stop it
        let settings = if shortcut.is_passthrough() {
            Settings::default()
        } else {
            Settings::load()?
        };
        cli::run_shortcut(&shortcut, &settings, &interrupt).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let argv = std::iter::once("meow".to_string()).chain(cli::normalize_flags(args));
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        // --help and --version land here too
        Err(err) => {
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };
    let report_file = cli.report_file.clone();
    let config = cli.into_run_config()?;
    let settings = Settings::load()?;

    cli::run_pipeline(config, settings, report_file, &interrupt).await?;
    Ok(ExitCode::SUCCESS)
}
