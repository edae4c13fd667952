//! Shortcut mode
//!
//! `meow <git command> [args]` for a handful of common commands skips the
//! pipeline and runs git directly. `meow log` hands the terminal to
//! `git log` untouched.

use crate::commands::Invocation;
use std::fmt;
use std::str::FromStr;

/// Git commands `meow` runs directly when given as the first argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    /// `git log`, passed through with the terminal attached
    Log,
    /// `git add`
    Add,
    /// `git push`
    Push,
    /// `git pull`
    Pull,
    /// `git clone`
    Clone,
    /// `git fetch`
    Fetch,
    /// `git branch`
    Branch,
    /// `git commit`
    Commit,
    /// `git diff`
    Diff,
    /// `git status`
    Status,
}

impl ShortcutCommand {
    /// Subcommand name as git spells it
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Add => "add",
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Clone => "clone",
            Self::Fetch => "fetch",
            Self::Branch => "branch",
            Self::Commit => "commit",
            Self::Diff => "diff",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for ShortcutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "add" => Ok(Self::Add),
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            "clone" => Ok(Self::Clone),
            "fetch" => Ok(Self::Fetch),
            "branch" => Ok(Self::Branch),
            "commit" => Ok(Self::Commit),
            "diff" => Ok(Self::Diff),
            "status" => Ok(Self::Status),
            _ => Err(()),
        }
    }
}

/// A parsed shortcut invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Which git command
    pub command: ShortcutCommand,
    /// Remaining arguments
    pub args: Vec<String>,
}

impl Shortcut {
    /// Recognize a shortcut from process arguments (program name excluded)
    pub fn parse(args: &[String]) -> Option<Self> {
        let (first, rest) = args.split_first()?;
        let command = first.parse().ok()?;
        Some(Self {
            command,
            args: rest.to_vec(),
        })
    }

    /// Whether git gets the terminal and its exit code becomes ours
    pub const fn is_passthrough(&self) -> bool {
        matches!(self.command, ShortcutCommand::Log)
    }

    /// Commands to run, in order
    ///
    /// `commit` stages the whole tree first.
    pub fn invocations(&self) -> Vec<Invocation> {
        let args = self.args.iter().map(String::as_str);
        match self.command {
            ShortcutCommand::Add => {
                let mut argv = vec!["git", "add"];
                if self.args.is_empty() {
                    argv.push(".");
                } else {
                    argv.extend(args);
                }
                vec![Invocation::active(argv)]
            }
            ShortcutCommand::Commit => {
                let mut commit = vec!["git".to_string(), "commit".to_string()];
                if !self.args.is_empty() {
                    commit.push("-m".to_string());
                    commit.push(self.args.join(" "));
                }
                vec![
                    Invocation::active(["git", "add", "."]),
                    Invocation::active(commit),
                ]
            }
            ShortcutCommand::Pull => {
                let argv = ["git", "pull"]
                    .into_iter()
                    .chain(args)
                    .chain(["--autostash"]);
                vec![Invocation::active(argv)]
            }
            ShortcutCommand::Clone => {
                let argv = ["git", "clone"]
                    .into_iter()
                    .chain(args)
                    .chain(["--verbose", "--recursive", "--remote-submodules"]);
                vec![Invocation::active(argv)]
            }
            command => {
                let argv = ["git", command.as_str()].into_iter().chain(args);
                vec![Invocation::active(argv)]
            }
        }
    }
}
