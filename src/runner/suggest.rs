//! Fix suggestions for common git failures

use regex::Regex;
use std::sync::LazyLock;

/// Push rejected because the remote has commits we don't
static RE_REJECTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)non-fast-forward|rejected").unwrap());

/// Authentication or filesystem permission problems
static RE_PERMISSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)permission denied").unwrap());

/// Suggest a fix for a failed command based on its stderr
///
/// Returns `None` when nothing matches.
pub fn suggest_fix(stderr: &str) -> Option<String> {
    let mut hints = Vec::new();

    if RE_REJECTED.is_match(stderr) {
        hints.push("try running `git pull` before pushing, or use --force-with-lease");
    }
    if RE_PERMISSION.is_match(stderr) {
        hints.push("check your ssh keys or credentials");
    }

    if hints.is_empty() {
        None
    } else {
        Some(hints.join("\n"))
    }
}
