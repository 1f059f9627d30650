//! Error handling for the sweep driver

use colored::{Color, Colorize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Bad flag, env value or launcher/scenario setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// A data rate or distance the simulator cannot accept
    #[error("Validation error: {0}")]
    Validation(String),

    /// The launcher shell could not be started for some invocations
    #[error("Launch error: {0}")]
    Launch(String),

    /// Invocations ran but did not exit cleanly (strict mode only)
    #[error("{failed} of {total} simulator invocations failed")]
    SweepFailures { failed: usize, total: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn launch<S: Into<String>>(message: S) -> Self {
        Self::Launch(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Short tag shown in console output and log fields
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Launch(_) => "LAUNCH",
            Self::SweepFailures { .. } => "SWEEP",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => 1,
            Self::Launch(_) => 3,
            Self::SweepFailures { .. } => 4,
            Self::Internal(_) => 99,
        }
    }

    /// Hint printed under the error with `--verbose`
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Config(_) => "Check the SWEEP_* environment variables and command line flags.",
            Self::Validation(_) => {
                "Distances must be finite and non-negative; data rates are whole microsecond intervals that fit in 32 bits."
            }
            Self::Launch(_) => "Run from the ns-3 source tree or point --launcher at waf.",
            Self::SweepFailures { .. } => "Re-run the failing points with --verbose to see their commands.",
            Self::Internal(_) => "This is likely a bug. Please report it with the error details.",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("{}\n\nSuggestion: {}", self, self.suggestion())
    }

    fn console_color(&self) -> Color {
        match self {
            Self::Config(_) | Self::Validation(_) => Color::Red,
            Self::Launch(_) | Self::SweepFailures { .. } => Color::Yellow,
            Self::Internal(_) => Color::BrightRed,
        }
    }

    /// `[CATEGORY] message`, colored by severity when requested
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            let color = self.console_color();
            format!("[{}] {}", category.color(color).bold(), message.color(color))
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization error: {}", error))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
