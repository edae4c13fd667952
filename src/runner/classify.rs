//! Output classification for concise display
//!
//! Git's messages are localized and change between versions, so these
//! checks are best effort. Anything unrecognized falls through to the
//! short/long split, and nothing here affects whether a run succeeds.

/// How captured output should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// Nothing was printed
    Empty,
    /// Remote and local already agree
    UpToDate,
    /// Commit had nothing staged
    NothingToCommit,
    /// Commit summary listing created/deleted file modes, one entry per line
    ModeChanges(Vec<String>),
    /// Short message shown as-is
    Short(String),
    /// Long message (or one that only echoes the commit message), not shown
    Suppressed,
    /// Verbose mode: everything, untouched
    Verbatim(String),
}

/// Classify captured output
///
/// `limit` is the character count below which unrecognized output is shown.
/// `echo` is the commit message; short output containing it is suppressed
/// since the user just typed it.
pub fn classify(output: &str, limit: usize, echo: Option<&str>) -> OutputKind {
    let text = output.trim();

    if text.is_empty() {
        return OutputKind::Empty;
    }
    if text.contains("Everything up-to-date") || text.contains("Already up to date") {
        return OutputKind::UpToDate;
    }
    if text.contains("nothing to commit") {
        return OutputKind::NothingToCommit;
    }
    if text.contains("create mode") || text.contains("delete mode") {
        return OutputKind::ModeChanges(text.lines().map(str::to_string).collect());
    }
    if text.chars().count() < limit {
        if echo.is_some_and(|m| !m.is_empty() && text.contains(m)) {
            return OutputKind::Suppressed;
        }
        return OutputKind::Short(text.to_string());
    }

    OutputKind::Suppressed
}
