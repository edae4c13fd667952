//! CLI command handlers

mod progress;
mod run;
mod shortcut;
pub mod style;

pub use progress::CliProgress;
pub use run::run_pipeline;
pub use shortcut::run_shortcut;

use anstream::{eprintln, println};
use meower::error::Error;
use std::process::ExitCode;
use style::Stylize;
use tracing_subscriber::EnvFilter;

/// Install the diagnostic log subscriber (`MEOW_LOG`, default `warn`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("MEOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Rewrite the two-letter short flags clap cannot express
///
/// `-np` becomes `--no-push` and `-ve` becomes `--verbose`. Arguments after
/// `--` are left alone.
pub fn normalize_flags(args: Vec<String>) -> Vec<String> {
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.as_str() {
                "--" => {
                    after_separator = true;
                    arg
                }
                "-np" => "--no-push".to_string(),
                "-ve" => "--verbose".to_string(),
                _ => arg,
            }
        })
        .collect()
}

/// Print an error that reached the top level and pick the exit code
pub fn report_error(err: &anyhow::Error) -> ExitCode {
    let code = match err.downcast_ref::<Error>() {
        Some(Error::Interrupted) => {
            eprintln!("\n\n{}", "operation cancelled by user".caution());
            Error::Interrupted.exit_code()
        }
        Some(known) if known.is_reported() => known.exit_code(),
        Some(known) => {
            eprintln!("{} {}", "error:".danger(), known);
            known.exit_code()
        }
        None => {
            eprintln!("{} {err:#}", "error:".danger());
            1
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Print the run header
pub fn print_header() {
    println!("{} {}", style::brand(), format!("v{}", meower::VERSION).accent());
    print_current_dir();
    println!();
}

/// Print the working directory
pub fn print_current_dir() {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "?".to_string());
    println!("\ncurrent directory: {}", cwd.emphasis());
}

/// `meow meow`
pub fn print_greeting() {
    println!("{} {}", style::brand(), "meow :3".accent());
}
