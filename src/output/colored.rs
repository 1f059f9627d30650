//! Colored formatter implementation with terminal color support

use super::formatter::{column_widths, outcome_cells, FormattingOptions, OutputFormatter, PlainFormatter, TABLE_HEADERS};
use crate::error::Result;
use crate::models::{ExitState, InvocationOutcome, SweepReport};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub failure: Color,
    pub warning: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Cyan,
            success: Color::Green,
            failure: Color::Red,
            warning: Color::Yellow,
        }
    }
}

impl ColorScheme {
    /// Color for an exit state
    pub fn for_state(&self, state: &ExitState) -> Color {
        match state {
            ExitState::Success => self.success,
            ExitState::Failed { .. } => self.failure,
            ExitState::Terminated { .. } | ExitState::LaunchFailed { .. } => self.warning,
        }
    }
}

/// Colored formatter; layout matches [`PlainFormatter`]
pub struct ColoredFormatter {
    plain: PlainFormatter,
    colors: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain: PlainFormatter::new(options),
            colors: ColorScheme::default(),
        }
    }

    pub fn with_scheme(options: FormattingOptions, colors: ColorScheme) -> Self {
        Self {
            plain: PlainFormatter::new(options),
            colors,
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let underline = "=".repeat(title.chars().count());
        Ok(format!(
            "{}\n{}",
            title.color(self.colors.header).bold(),
            underline.color(self.colors.header)
        ))
    }

    fn format_summary(&self, report: &SweepReport) -> Result<String> {
        let failed = report.failed().to_string();
        let failed = if report.failed() > 0 {
            failed.color(self.colors.failure).bold()
        } else {
            failed.normal()
        };

        let mut output = String::new();
        let _ = writeln!(output, "Invocations: {}", report.total().to_string().bold());
        let _ = writeln!(output, "Succeeded:   {}", report.succeeded().to_string().color(self.colors.success));
        let _ = writeln!(output, "Failed:      {}", failed);
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
        let _ = writeln!(output, "  {}", header.join("  ").trim_end().bold());

        // Pad before coloring so escape codes don't skew the widths
        for (outcome, row) in outcomes.iter().zip(rows.iter()) {
            let state_color = self.colors.for_state(&outcome.state);
            let cells: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (c, w))| {
                    let padded = format!("{:<w$}", c, w = *w);
                    if i == 3 {
                        padded.color(state_color).to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            let _ = writeln!(output, "  {}", cells.join("  ").trim_end());
        }

        Ok(output.trim_end().to_string())
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", "WARNING:".color(self.colors.warning).bold(), warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{} {}", "OK:".color(self.colors.success).bold(), message))
    }

    fn lists_all_outcomes(&self) -> bool {
        self.plain.lists_all_outcomes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::SweepPoint;
    use std::time::Duration;

    #[test]
    fn test_state_colors() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.for_state(&ExitState::Success), Color::Green);
        assert_eq!(scheme.for_state(&ExitState::Failed { code: 1 }), Color::Red);
        assert_eq!(scheme.for_state(&ExitState::Terminated { signal: None }), Color::Yellow);
    }

    #[test]
    fn test_colored_table_keeps_content() {
        colored::control::set_override(true);
        let formatter = ColoredFormatter::new(FormattingOptions::default());
        let outcome = InvocationOutcome {
            point: SweepPoint::new(8e3, 120.0, 9),
            command: String::new(),
            state: ExitState::Failed { code: 2 },
            duration: Duration::from_millis(250),
        };

        let table = formatter.format_outcome_table(&[&outcome]).unwrap();
        assert!(table.contains("8000"));
        assert!(table.contains("120"));
        assert!(table.contains("exit 2"));
        colored::control::unset_override();
    }

    #[test]
    fn test_verbose_flag_passthrough() {
        let formatter = ColoredFormatter::new(FormattingOptions {
            enable_color: true,
            verbose_mode: true,
        });
        assert!(formatter.lists_all_outcomes());
    }
}
