//! Step-by-step console output

use console::{style, Style, Term};
use donate_e2e::{ScenarioReport, StepRecord};
use std::time::Duration;

/// Prints scenario progress
#[derive(Debug)]
pub struct StepReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for StepReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl StepReporter {
    /// Create a reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Format a passed step line
    #[must_use]
    pub fn step_line(&self, index: usize, step: &StepRecord) -> String {
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        format!(
            "{prefix} {:>2}. {} ({} ms)",
            index + 1,
            step.name,
            step.elapsed_ms
        )
    }

    /// Print every passed step
    pub fn steps(&self, report: &ScenarioReport) {
        if self.quiet {
            return;
        }
        for (index, step) in report.steps.iter().enumerate() {
            let _ = self.term.write_line(&self.step_line(index, step));
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Format the closing summary line
    #[must_use]
    pub fn summary_line(&self, passed: usize, failed: bool, duration: Duration) -> String {
        let status = if failed { "FAILED" } else { "PASSED" };
        let secs = duration.as_secs_f64();
        if self.use_color {
            let status_style = if failed {
                Style::new().red().bold()
            } else {
                Style::new().green().bold()
            };
            format!(
                "{} {} step(s) passed in {secs:.2}s",
                status_style.apply_to(status),
                passed
            )
        } else {
            format!("{status} {passed} step(s) passed in {secs:.2}s")
        }
    }

    /// Print the closing summary
    pub fn summary(&self, passed: usize, failed: bool, duration: Duration) {
        if self.quiet && !failed {
            return;
        }
        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&self.summary_line(passed, failed, duration));
    }
}
