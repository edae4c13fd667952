//! Pipeline command - stage, commit, push

use crate::cli::style::Stylize;
use crate::cli::{CliProgress, print_header};
use anstream::println;
use meower::error::Result;
use meower::pipeline::{Pipeline, select_steps};
use meower::runner::Interrupt;
use meower::settings::Settings;
use meower::types::RunConfig;
use std::path::PathBuf;

/// Run the full pipeline for `config`
///
/// The report goes to stdout with `--report`, otherwise to `report_file`
/// (or the settings' default file).
pub async fn run_pipeline(
    config: RunConfig,
    settings: Settings,
    report_file: Option<PathBuf>,
    interrupt: &Interrupt,
) -> Result<()> {
    print_header();
    if config.dry_run {
        println!("{}", "dry run".emphasis().caution());
    }

    let destination = if config.report {
        None
    } else {
        Some(report_file.unwrap_or_else(|| settings.report_file.clone()))
    };

    let steps = select_steps(&config);
    let progress = CliProgress::new(settings.spinner_tick());
    let mut pipeline = Pipeline::new(config, steps)?.with_settings(settings);

    pipeline.run(&progress, interrupt).await?;
    pipeline
        .generate_report(destination.as_deref(), &progress)
        .await?;

    println!("\n😺");
    Ok(())
}
