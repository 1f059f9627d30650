//! Core formatting trait and the plain text implementation

use crate::error::Result;
use crate::models::{InvocationOutcome, SweepReport};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the invocation counters
    fn format_summary(&self, report: &SweepReport) -> Result<String>;

    /// Format a table of outcomes
    fn format_outcome_table(&self, outcomes: &[&InvocationOutcome]) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;

    /// Whether every outcome should be listed, not just failures
    fn lists_all_outcomes(&self) -> bool;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub enable_color: bool,
    /// List every invocation instead of failures only
    pub verbose_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
        }
    }
}

pub(crate) const TABLE_HEADERS: [&str; 5] = ["RUN", "DATA RATE", "DISTANCE", "STATUS", "TIME"];

/// Table cells for one outcome, in `TABLE_HEADERS` order
pub(crate) fn outcome_cells(outcome: &InvocationOutcome) -> [String; 5] {
    [
        outcome.point.run.to_string(),
        outcome.point.data_rate.to_string(),
        outcome.point.distance.to_string(),
        outcome.state.label(),
        format!("{:.3}s", outcome.duration.as_secs_f64()),
    ]
}

/// Column widths wide enough for headers and every cell
pub(crate) fn column_widths(rows: &[[String; 5]]) -> [usize; 5] {
    let mut widths = TABLE_HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!("{}\n{}", title, "=".repeat(title.chars().count())))
    }

    fn format_summary(&self, report: &SweepReport) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "Invocations: {}", report.total());
        let _ = writeln!(output, "Succeeded:   {}", report.succeeded());
        let _ = writeln!(output, "Failed:      {}", report.failed());
        let _ = write!(output, "Duration:    {:.3}s", report.total_duration.as_secs_f64());
        Ok(output)
    }

    fn format_outcome_table(&self, outcomes: &[&InvocationOutcome]) -> Result<String> {
        if outcomes.is_empty() {
            return Ok(String::new());
        }

        let rows: Vec<[String; 5]> = outcomes.iter().map(|o| outcome_cells(o)).collect();
        let widths = column_widths(&rows);

        let mut output = String::new();
        let header: Vec<String> = TABLE_HEADERS
            .iter()
            .zip(widths.iter())
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect();
        let _ = writeln!(output, "  {}", header.join("  ").trim_end());

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .map(|(c, w)| format!("{:<w$}", c, w = *w))
                .collect();
            let _ = writeln!(output, "  {}", cells.join("  ").trim_end());
        }

        Ok(output.trim_end().to_string())
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("OK: {}", message))
    }

    fn lists_all_outcomes(&self) -> bool {
        self.options.verbose_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExitState;
    use crate::sweep::SweepPoint;
    use chrono::Utc;
    use std::time::Duration;

    fn outcome(run: i64, state: ExitState) -> InvocationOutcome {
        InvocationOutcome {
            point: SweepPoint::new(8e5, 50.0, run),
            command: String::new(),
            state,
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_header() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        assert_eq!(formatter.format_header("Sweep").unwrap(), "Sweep\n=====");
    }

    #[test]
    fn test_summary_counts() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let mut report = SweepReport::new(Utc::now());
        report.record(outcome(1, ExitState::Success));
        report.record(outcome(2, ExitState::Failed { code: 1 }));

        let summary = formatter.format_summary(&report).unwrap();
        assert!(summary.contains("Invocations: 2"));
        assert!(summary.contains("Succeeded:   1"));
        assert!(summary.contains("Failed:      1"));
    }

    #[test]
    fn test_outcome_table() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let failed = outcome(12, ExitState::Failed { code: 134 });
        let table = formatter.format_outcome_table(&[&failed]).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  RUN"));
        assert!(lines[1].contains("800000"));
        assert!(lines[1].contains("exit 134"));
        assert!(lines[1].ends_with("1.500s"));
    }

    #[test]
    fn test_empty_table() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        assert!(formatter.format_outcome_table(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_column_widths() {
        let rows = vec![outcome_cells(&outcome(123456789, ExitState::Success))];
        let widths = column_widths(&rows);
        assert_eq!(widths[0], 9);
        assert_eq!(widths[1], "DATA RATE".len());
    }
}
