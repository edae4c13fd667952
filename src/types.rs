//! Core types for meower

use crate::error::{Error, Result};
use std::fmt;

/// Everything one invocation of `meow` was asked to do
///
/// Built once from the command line and passed by reference to every layer
/// that needs it. It is never mutated while a pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunConfig {
    /// Commit message (positional tokens joined with spaces)
    pub message: Option<String>,
    /// Explicit paths to stage; empty means the whole tree
    pub add: Vec<String>,
    /// Allow committing without a message
    pub no_message: bool,
    /// Allow a commit with no changes
    pub allow_empty: bool,
    /// Amend the previous commit
    pub amend: bool,
    /// Show the staged diff before committing
    pub diff: bool,
    /// Remote and branch to set as upstream when pushing
    pub upstream: Option<Upstream>,
    /// Push with `--force-with-lease`
    pub force: bool,
    /// Skip the push step
    pub no_push: bool,
    /// Push tags along with commits
    pub tags: bool,
    /// Pull before committing
    pub pull: bool,
    /// Pull with `--no-rebase` (implies pull)
    pub pull_no_rebase: bool,
    /// Update submodules recursively
    pub update_submodules: bool,
    /// Stash changes before pulling
    pub stash: bool,
    /// Print the report instead of writing it to a file
    pub report: bool,
    /// Keep going when a command fails
    pub continue_on_error: bool,
    /// Pass `--quiet` to git
    pub quiet: bool,
    /// Pass `--verbose` to git and show full command output
    pub verbose: bool,
    /// Print commands without running them
    pub dry_run: bool,
    /// Show `git status` first
    pub status: bool,
}

impl RunConfig {
    /// Commit message, if one was given and is not blank
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// Whether any pull variant was requested
    pub const fn wants_pull(&self) -> bool {
        self.pull || self.pull_no_rebase
    }

    /// Check flag combinations that must be rejected before anything runs
    pub fn validate(&self) -> Result<()> {
        if self.message().is_none() && !self.amend && !self.no_message {
            return Err(Error::MissingMessage);
        }
        Ok(())
    }
}

/// Upstream target for `git push --set-upstream`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Remote name (e.g., "origin")
    pub remote: String,
    /// Branch name (e.g., "main")
    pub branch: String,
}

impl Upstream {
    /// Parse the tokens given to `--upstream`
    ///
    /// Accepts a single `remote/branch` token (split on the first `/`) or
    /// two tokens `remote branch`.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let joined = || {
            tokens
                .iter()
                .map(|token| token.as_ref())
                .collect::<Vec<&str>>()
                .join(" ")
        };

        let (remote, branch) = match tokens {
            [single] => single
                .as_ref()
                .split_once('/')
                .ok_or_else(|| Error::InvalidUpstream(joined()))?,
            [remote, branch] => (remote.as_ref(), branch.as_ref()),
            _ => return Err(Error::InvalidUpstream(joined())),
        };

        if remote.is_empty() || branch.is_empty() {
            return Err(Error::InvalidUpstream(joined()));
        }

        Ok(Self {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remote, self.branch)
    }
}
