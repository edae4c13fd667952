//! Step selection
//!
//! Candidate order is fixed: status, submodule update, stash, pull, stage,
//! diff, commit, push. A candidate is kept when its builder reports a
//! nonzero weight for the configuration.

use super::Step;
use crate::commands::{self, StepBuilder};
use crate::types::RunConfig;

/// The kinds of step a pipeline can contain, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// `git status`
    Status,
    /// `git submodule update`
    UpdateSubmodules,
    /// `git stash`
    Stash,
    /// `git pull`
    Pull,
    /// `git add`
    Stage,
    /// `git diff --staged`
    Diff,
    /// `git commit`
    Commit,
    /// `git push`
    Push,
}

impl StepKind {
    /// Every kind, in the order steps run
    pub const ALL: [Self; 8] = [
        Self::Status,
        Self::UpdateSubmodules,
        Self::Stash,
        Self::Pull,
        Self::Stage,
        Self::Diff,
        Self::Commit,
        Self::Push,
    ];

    /// Name shown in the step list and the report
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "get status",
            Self::UpdateSubmodules => "update submodules",
            Self::Stash => "stash changes",
            Self::Pull => "pull from remote",
            Self::Stage => "stage changes",
            Self::Diff => "get diff",
            Self::Commit => "commit changes",
            Self::Push => "push changes",
        }
    }

    /// Builder producing this kind's command
    pub fn builder(self) -> StepBuilder {
        match self {
            Self::Status => commands::status,
            Self::UpdateSubmodules => commands::update_submodules,
            Self::Stash => commands::stash,
            Self::Pull => commands::pull,
            Self::Stage => commands::stage,
            Self::Diff => commands::diff,
            Self::Commit => commands::commit,
            Self::Push => commands::push,
        }
    }

    /// Whether the step's output goes straight to the terminal
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Status | Self::Diff)
    }

    /// Build the step
    pub fn step(self) -> Step {
        Step::new(self.name(), self.builder(), self.is_interactive())
    }
}

/// Choose the steps `config` asks for, in execution order
pub fn select_steps(config: &RunConfig) -> Vec<Step> {
    StepKind::ALL
        .into_iter()
        .filter(|kind| (kind.builder())(config).is_active())
        .map(StepKind::step)
        .collect()
}
