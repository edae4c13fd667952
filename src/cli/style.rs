//! Terminal styling helpers
//!
//! Colors are emitted unconditionally; printing goes through `anstream`,
//! which strips them when the output is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic color roles for CLI output
pub trait Stylize {
    /// Commands, names, things to look at
    fn accent(&self) -> String;
    /// Secondary information
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Errors
    fn danger(&self) -> String;
    /// Warnings and notices
    fn caution(&self) -> String;
    /// Success lines
    fn positive(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn muted(&self) -> String {
        self.bright_black().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn danger(&self) -> String {
        self.red().bold().to_string()
    }

    fn caution(&self) -> String {
        self.yellow().bold().to_string()
    }

    fn positive(&self) -> String {
        self.green().bold().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".positive()
}

/// Red cross
pub fn cross() -> String {
    "❌".danger()
}

/// Program name as shown in headers
pub fn brand() -> String {
    "meow".magenta().bold().to_string()
}

/// Spinner shown while a captured command runs
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

/// Overall step bar while running
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {wide_bar:.red/blue} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Overall step bar after the last step
pub fn bar_done_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {wide_bar:.green} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Overall step bar after a failure
pub fn bar_failed_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {wide_bar:.magenta} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
