//! Shortcut command - run one git command without the pipeline

use crate::cli::CliProgress;
use meower::error::Result;
use meower::pipeline::NoopProgress;
use meower::runner::{Interrupt, Runner};
use meower::settings::Settings;
use meower::shortcut::Shortcut;
use meower::types::RunConfig;

/// Run a shortcut such as `meow add src/` or `meow log --oneline`
///
/// `log` gets the terminal and no decoration; a nonzero exit from git
/// surfaces as [`meower::error::Error::CommandFailed`] carrying git's code.
pub async fn run_shortcut(
    shortcut: &Shortcut,
    settings: &Settings,
    interrupt: &Interrupt,
) -> Result<()> {
    let config = RunConfig {
        verbose: true,
        ..Default::default()
    };
    let runner = Runner::new(&config, interrupt.clone())
        .with_short_output_limit(settings.short_output_limit);

    if shortcut.is_passthrough() {
        for invocation in shortcut.invocations() {
            runner.execute(&invocation.argv, true, &NoopProgress).await?;
        }
        return Ok(());
    }

    let progress = CliProgress::new(settings.spinner_tick());
    for invocation in shortcut.invocations() {
        runner.execute(&invocation.argv, false, &progress).await?;
    }
    Ok(())
}
