//! End-of-sweep summary output
//!
//! Plain and colored text formatters share one layout; `--json` bypasses
//! them and serializes the whole [`SweepReport`].

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};

use crate::error::Result;
use crate::models::{InvocationOutcome, SweepReport};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Renders a finished sweep for the terminal
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Header, counters and an outcome table (failures only unless verbose)
    pub fn display_report(&self, report: &SweepReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.formatter.format_header("WAVE Sweep Results")?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_summary(report)?);

        if report.is_empty() {
            output.push_str("\n\n");
            output.push_str(&self.formatter.format_warning("No invocations: empty value set or inverted run range")?);
            return Ok(output);
        }

        let listed: Vec<&InvocationOutcome> = if self.formatter.lists_all_outcomes() {
            report.outcomes.iter().collect()
        } else {
            report.failures().collect()
        };

        if !listed.is_empty() {
            output.push_str("\n\n");
            output.push_str(if self.formatter.lists_all_outcomes() {
                "Invocations:\n"
            } else {
                "Failed invocations:\n"
            });
            output.push_str(&self.formatter.format_outcome_table(&listed)?);
        }

        if report.failed() == 0 {
            output.push_str("\n\n");
            output.push_str(&self.formatter.format_success("all invocations exited cleanly")?);
        }

        Ok(output)
    }
}

/// Serialize a report as pretty-printed JSON
pub fn report_to_json(report: &SweepReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExitState;
    use crate::sweep::SweepPoint;
    use chrono::Utc;
    use std::time::Duration;

    fn report_with(states: &[ExitState]) -> SweepReport {
        let mut report = SweepReport::new(Utc::now());
        for (i, state) in states.iter().enumerate() {
            report.record(InvocationOutcome {
                point: SweepPoint::new(8e5, 50.0, i as i64 + 1),
                command: format!("cmd {}", i + 1),
                state: state.clone(),
                duration: Duration::from_millis(10),
            });
        }
        report
    }

    #[test]
    fn test_plain_report_lists_failures_only() {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::create_formatter(false, false));
        let report = report_with(&[ExitState::Success, ExitState::Failed { code: 1 }]);
        let output = coordinator.display_report(&report).unwrap();

        assert!(output.starts_with("WAVE Sweep Results"));
        assert!(output.contains("Failed invocations:"));
        assert!(output.contains("exit 1"));
        assert!(!output.contains(" ok "));
        assert!(!output.contains("OK:"));
    }

    #[test]
    fn test_verbose_report_lists_everything() {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::create_formatter(false, true));
        let report = report_with(&[ExitState::Success, ExitState::Success]);
        let output = coordinator.display_report(&report).unwrap();

        assert!(output.contains("Invocations:\n"));
        assert_eq!(output.matches(" ok ").count(), 2);
        assert!(output.contains("OK: all invocations exited cleanly"));
    }

    #[test]
    fn test_empty_report_warns() {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::create_formatter(false, false));
        let output = coordinator.display_report(&report_with(&[])).unwrap();
        assert!(output.contains("WARNING: No invocations"));
    }

    #[test]
    fn test_json_report() {
        let report = report_with(&[ExitState::Failed { code: 2 }]);
        let json = report_to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcomes"][0]["point"]["run"], 1);
        assert_eq!(value["outcomes"][0]["state"]["state"], "failed");
        assert_eq!(value["outcomes"][0]["state"]["code"], 2);
    }
}
