//! Command builder
//!
//! Pure functions mapping a [`RunConfig`] to the `git` argument vector of
//! each pipeline step. A builder returns a zero-weight [`Invocation`] when
//! its step is not wanted for this configuration.

use crate::types::RunConfig;

/// What one step wants to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Progress units this step contributes; 0 means the step is skipped
    pub weight: u32,
    /// Full argument vector, program first
    pub argv: Vec<String>,
}

impl Invocation {
    /// An active invocation worth one progress unit
    pub fn active<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            weight: 1,
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// A skipped invocation
    pub const fn skipped() -> Self {
        Self {
            weight: 0,
            argv: Vec::new(),
        }
    }

    /// Whether this step runs at all
    pub const fn is_active(&self) -> bool {
        self.weight > 0
    }
}

/// Signature shared by every step builder
pub type StepBuilder = fn(&RunConfig) -> Invocation;

/// `git status`
pub fn status(config: &RunConfig) -> Invocation {
    if config.status {
        Invocation::active(["git", "status"])
    } else {
        Invocation::skipped()
    }
}

/// `git submodule update --init --recursive`
pub fn update_submodules(config: &RunConfig) -> Invocation {
    if config.update_submodules {
        Invocation::active(["git", "submodule", "update", "--init", "--recursive"])
    } else {
        Invocation::skipped()
    }
}

/// `git stash`
pub fn stash(config: &RunConfig) -> Invocation {
    if config.stash {
        Invocation::active(["git", "stash"])
    } else {
        Invocation::skipped()
    }
}

/// `git pull [--no-rebase] --autostash`
pub fn pull(config: &RunConfig) -> Invocation {
    if !config.wants_pull() {
        return Invocation::skipped();
    }

    let mut argv = vec!["git", "pull"];
    if config.pull_no_rebase {
        argv.push("--no-rebase");
    }
    argv.push("--autostash");
    Invocation::active(argv)
}

/// `git add <paths>`, defaulting to the whole tree
pub fn stage(config: &RunConfig) -> Invocation {
    let mut argv = vec!["git".to_string(), "add".to_string()];
    if config.add.is_empty() {
        argv.push(".".to_string());
    } else {
        argv.extend(config.add.iter().cloned());
    }
    if config.verbose && !config.quiet {
        argv.push("--verbose".to_string());
    }
    Invocation::active(argv)
}

/// `git diff --staged`
pub fn diff(config: &RunConfig) -> Invocation {
    if config.diff {
        Invocation::active(["git", "diff", "--staged"])
    } else {
        Invocation::skipped()
    }
}

/// `git commit ...`
///
/// A message wins over `--allow-empty-message`. Without either, git opens
/// the editor.
pub fn commit(config: &RunConfig) -> Invocation {
    let mut argv = vec!["git".to_string(), "commit".to_string()];

    if let Some(message) = config.message() {
        argv.push("-m".to_string());
        argv.push(message.to_string());
    } else if config.no_message {
        argv.push("--allow-empty-message".to_string());
    }

    if config.amend {
        argv.push("--amend".to_string());
    }
    if config.allow_empty {
        argv.push("--allow-empty".to_string());
    }
    push_verbosity(&mut argv, config);

    Invocation::active(argv)
}

/// `git push ...`, skipped with `--no-push`
pub fn push(config: &RunConfig) -> Invocation {
    if config.no_push {
        return Invocation::skipped();
    }

    let mut argv = vec!["git".to_string(), "push".to_string()];

    if config.tags {
        argv.push("--tags".to_string());
    }
    if let Some(upstream) = &config.upstream {
        argv.push("--set-upstream".to_string());
        argv.push(upstream.remote.clone());
        argv.push(upstream.branch.clone());
    }
    if config.force {
        argv.push("--force-with-lease".to_string());
    }
    push_verbosity(&mut argv, config);

    Invocation::active(argv)
}

fn push_verbosity(argv: &mut Vec<String>, config: &RunConfig) {
    if config.quiet {
        argv.push("--quiet".to_string());
    } else if config.verbose {
        argv.push("--verbose".to_string());
    }
}

/// Join an argument vector for display
///
/// Arguments containing whitespace or quotes (or empty ones) are wrapped in
/// double quotes so the line reads like something you could type.
pub fn command_line<S: AsRef<str>>(argv: &[S]) -> String {
    argv.iter()
        .map(|arg| quote(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Upstream;

    fn with_message(message: &str) -> RunConfig {
        RunConfig {
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_optional_steps_skipped_by_default() {
        let config = with_message("x");
        assert!(!status(&config).is_active());
        assert!(!update_submodules(&config).is_active());
        assert!(!stash(&config).is_active());
        assert!(!pull(&config).is_active());
        assert!(!diff(&config).is_active());
        assert_eq!(status(&config).argv, Vec::<String>::new());
    }

    #[test]
    fn test_stage_defaults_to_whole_tree() {
        let invocation = stage(&with_message("x"));
        assert_eq!(invocation.weight, 1);
        assert_eq!(command_line(&invocation.argv), "git add .");
    }

    #[test]
    fn test_stage_explicit_paths() {
        let config = RunConfig {
            add: vec!["src/lib.rs".into(), "README.md".into()],
            verbose: true,
            ..with_message("x")
        };
        assert_eq!(
            stage(&config).argv,
            vec!["git", "add", "src/lib.rs", "README.md", "--verbose"]
        );
    }

    #[test]
    fn test_commit_with_message() {
        let invocation = commit(&with_message("fix bug"));
        assert_eq!(invocation.argv, vec!["git", "commit", "-m", "fix bug"]);
        assert_eq!(command_line(&invocation.argv), r#"git commit -m "fix bug""#);
    }

    #[test]
    fn test_commit_message_beats_allow_empty_message() {
        let config = RunConfig {
            no_message: true,
            ..with_message("msg")
        };
        let argv = commit(&config).argv;
        assert!(argv.contains(&"-m".to_string()));
        assert!(!argv.contains(&"--allow-empty-message".to_string()));
    }

    #[test]
    fn test_commit_flags_and_quiet_wins() {
        let config = RunConfig {
            no_message: true,
            amend: true,
            allow_empty: true,
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(
            commit(&config).argv,
            vec![
                "git",
                "commit",
                "--allow-empty-message",
                "--amend",
                "--allow-empty",
                "--quiet"
            ]
        );
    }

    #[test]
    fn test_push_plain() {
        assert_eq!(command_line(&push(&with_message("x")).argv), "git push");
    }

    #[test]
    fn test_push_skipped_with_no_push() {
        let config = RunConfig {
            no_push: true,
            ..with_message("x")
        };
        assert!(!push(&config).is_active());
    }

    #[test]
    fn test_push_full_flags_in_order() {
        let config = RunConfig {
            tags: true,
            force: true,
            verbose: true,
            upstream: Some(Upstream::parse(&["origin/main"]).unwrap()),
            ..with_message("x")
        };
        assert_eq!(
            command_line(&push(&config).argv),
            "git push --tags --set-upstream origin main --force-with-lease --verbose"
        );
    }

    #[test]
    fn test_pull_variants_autostash() {
        let config = RunConfig {
            pull: true,
            ..with_message("x")
        };
        assert_eq!(pull(&config).argv, vec!["git", "pull", "--autostash"]);

        let config = RunConfig {
            pull_no_rebase: true,
            ..with_message("x")
        };
        assert_eq!(
            pull(&config).argv,
            vec!["git", "pull", "--no-rebase", "--autostash"]
        );
    }

    #[test]
    fn test_command_line_quoting() {
        assert_eq!(command_line(&["git", "commit", "-m", ""]), r#"git commit -m """#);
        assert_eq!(
            command_line(&["git", "commit", "-m", r#"say "hi""#]),
            r#"git commit -m "say \"hi\"""#
        );
        assert_eq!(command_line::<&str>(&[]), "");
    }
}
