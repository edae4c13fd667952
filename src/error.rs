//! Error types for meower

use thiserror::Error;

/// Exit code used when the user interrupts a run
pub const INTERRUPTED_EXIT_CODE: i32 = 1;

/// Errors that can occur while building or running a pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// No commit message and nothing that makes one optional
    #[error("commit message required (use --amend, --no-message, or provide message)")]
    MissingMessage,

    /// Upstream was not `REMOTE/BRANCH` or `REMOTE BRANCH`
    #[error("invalid upstream format '{0}'. Use 'REMOTE BRANCH' or 'REMOTE/BRANCH'")]
    InvalidUpstream(String),

    /// Settings file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// The child process could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that failed to start
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A command exited nonzero and the run is not continuing on errors
    #[error("command failed with exit code {}: {command}", describe_code(.code))]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit code, absent when the child was killed by a signal
        code: Option<i32>,
    },

    /// User pressed Ctrl+C
    #[error("operation cancelled by user")]
    Interrupted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Process exit code this error should end the program with
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            Self::Interrupted => INTERRUPTED_EXIT_CODE,
            _ => 1,
        }
    }

    /// Whether the details were already shown to the user when the error
    /// happened
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "(signal)".to_string(), |c| c.to_string())
}

/// Result type alias using meower's Error
pub type Result<T> = std::result::Result<T, Error>;
