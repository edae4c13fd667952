//! Pipeline report
//!
//! One record per executed step, in execution order, plus a final TOTAL
//! entry.

use chrono::{DateTime, Local, SecondsFormat};
use std::fmt;
use std::time::Duration;

/// Name of the synthetic summary entry
pub const TOTAL_STEP_NAME: &str = "TOTAL";

/// Result of running one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Step name
    pub step: String,
    /// Joined command line
    pub command: String,
    /// Wall-clock time around the subprocess call
    pub duration: Duration,
    /// Captured output (empty when not captured)
    pub output: String,
    /// Exit code; absent on dry runs, and when killed by a signal
    pub exit_code: Option<i32>,
}

/// Ordered step records for one run
#[derive(Debug, Clone)]
pub struct Report {
    started_at: DateTime<Local>,
    steps: Vec<StepResult>,
    total: Option<Duration>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Empty report stamped with the current time
    pub fn new() -> Self {
        Self::started_at(Local::now())
    }

    /// Empty report with a fixed start time
    pub const fn started_at(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            steps: Vec::new(),
            total: None,
        }
    }

    /// Append a step record
    pub fn push(&mut self, result: StepResult) {
        self.steps.push(result);
    }

    /// Close the report with the run's total wall-clock time
    ///
    /// The total is measured from pipeline start to end, so it also covers
    /// the time spent between subprocess calls and is never less than the
    /// sum of step durations.
    pub fn finish(&mut self, total: Duration) {
        self.total = Some(total);
    }

    /// Step records in execution order
    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// Total duration, once finished
    pub const fn total(&self) -> Option<Duration> {
        self.total
    }

    /// Whether [`Report::finish`] has been called
    pub const fn is_finished(&self) -> bool {
        self.total.is_some()
    }

    /// When the run started
    pub const fn started(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Every entry including the TOTAL summary, if finished
    pub fn entries(&self) -> Vec<StepResult> {
        let mut entries = self.steps.clone();
        if let Some(total) = self.total {
            entries.push(StepResult {
                step: TOTAL_STEP_NAME.to_string(),
                command: String::new(),
                duration: total,
                output: String::new(),
                exit_code: None,
            });
        }
        entries
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Report (started {}):",
            self.started_at.to_rfc3339_opts(SecondsFormat::Secs, false)
        )?;
        writeln!(f)?;

        for entry in self.entries() {
            writeln!(f, "Step: {}", entry.step)?;
            let command = if entry.command.is_empty() {
                "N/A"
            } else {
                entry.command.as_str()
            };
            writeln!(f, "  Command: {command}")?;
            writeln!(f, "  Duration: {:.8} seconds", entry.duration.as_secs_f64())?;
            let output = entry.output.trim_end();
            if !output.is_empty() {
                writeln!(f, "  Output: {output}")?;
            }
            if let Some(code) = entry.exit_code.filter(|c| *c != 0) {
                writeln!(f, "  Return Code: {code}")?;
            }
            writeln!(f)?;
        }

        if let Some(total) = self.total {
            writeln!(f, "Total Duration: {:.8} seconds", total.as_secs_f64())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(step: &str, command: &str, millis: u64, code: Option<i32>) -> StepResult {
        StepResult {
            step: step.to_string(),
            command: command.to_string(),
            duration: Duration::from_millis(millis),
            output: String::new(),
            exit_code: code,
        }
    }

    fn fixed_report() -> Report {
        let start = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Report::started_at(start)
    }

    #[test]
    fn test_entries_append_total_last() {
        let mut report = fixed_report();
        report.push(result("stage changes", "git add .", 10, Some(0)));
        report.push(result("commit changes", "git commit -m x", 20, Some(0)));
        assert!(!report.is_finished());
        assert_eq!(report.entries().len(), 2);

        report.finish(Duration::from_millis(40));
        let entries = report.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].step, "stage changes");
        assert_eq!(entries[2].step, TOTAL_STEP_NAME);
        assert_eq!(entries[2].duration, Duration::from_millis(40));
    }

    #[test]
    fn test_render_plain_text() {
        let mut report = fixed_report();
        report.push(StepResult {
            output: "Everything up-to-date\n".to_string(),
            ..result("push changes", "git push", 1500, Some(0))
        });
        report.push(result("stash changes", "git stash", 250, Some(1)));
        report.finish(Duration::from_secs(2));

        let text = report.to_string();
        assert!(text.starts_with("Report (started 2024-05-01T12:00:00"));
        assert!(text.contains("Step: push changes\n  Command: git push\n  Duration: 1.50000000 seconds\n  Output: Everything up-to-date\n\n"));
        assert!(text.contains("  Return Code: 1\n"));
        assert!(!text.contains("Return Code: 0"));
        assert!(text.contains("Step: TOTAL\n  Command: N/A\n  Duration: 2.00000000 seconds\n"));
        assert!(text.ends_with("Total Duration: 2.00000000 seconds\n"));
    }

    #[test]
    fn test_dry_run_entries_have_no_code() {
        let mut report = fixed_report();
        report.push(result("push changes", "git push", 0, None));
        report.finish(Duration::ZERO);
        let text = report.to_string();
        assert!(!text.contains("Return Code"));
        assert!(!text.contains("Output:"));
    }
}
