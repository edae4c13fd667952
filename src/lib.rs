//! meower - the engine behind `meow`
//!
//! Wraps the `git` executable to run the usual stage → commit → push
//! workflow as a pipeline of steps, with progress feedback and a timing
//! report. Nothing here speaks git's object model; every step is a `git`
//! subprocess.

pub mod commands;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod settings;
pub mod shortcut;
pub mod types;

/// Version string shown in the run header
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
