//! User settings loaded from a TOML file
//!
//! Lookup order:
//! 1. `MEOW_CONFIG` environment variable (path to a TOML file)
//! 2. `<config dir>/meow/config.toml`
//!
//! A missing file means defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default name of the report file
pub const DEFAULT_REPORT_FILE: &str = "report.txt";

/// Captured output shorter than this many characters is shown as-is
pub const DEFAULT_SHORT_OUTPUT_LIMIT: usize = 200;

/// Default spinner frame interval in milliseconds
pub const DEFAULT_SPINNER_TICK_MS: u64 = 80;

/// Tunables that are not worth a command-line flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the report is written when it is not printed
    pub report_file: PathBuf,
    /// Cutoff below which captured output is shown verbatim
    pub short_output_limit: usize,
    /// Spinner frame interval in milliseconds
    pub spinner_tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
            short_output_limit: DEFAULT_SHORT_OUTPUT_LIMIT,
            spinner_tick_ms: DEFAULT_SPINNER_TICK_MS,
        }
    }
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file, falling back to defaults if it
    /// does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        if settings.short_output_limit == 0 {
            return Err(Error::Config(format!(
                "{}: short_output_limit must be greater than zero",
                path.display()
            )));
        }

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Spinner frame interval
    pub const fn spinner_tick(&self) -> Duration {
        Duration::from_millis(self.spinner_tick_ms)
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("MEOW_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("meow").join("config.toml"))
}
