//! Command-line interface

use crate::models::Preset;
use clap::{ArgAction, Parser};

/// WAVE Sweep - run the ns-3 wave-udp-e2e scenario over a parameter sweep
#[derive(Parser, Debug, Clone)]
#[command(name = "wave-sweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// First run index; also used as the RNG seed
    #[arg(value_name = "INITIAL_RUN", allow_negative_numbers = true)]
    pub initial_run: i64,

    /// Last run index (inclusive)
    #[arg(value_name = "FINAL_RUN", allow_negative_numbers = true)]
    pub final_run: i64,

    /// Application data-rate value passed as --intPck (can be used multiple times)
    #[arg(long = "rate", value_name = "VALUE", action = ArgAction::Append, value_parser = parse_sweep_value)]
    pub rates: Vec<f64>,

    /// Node distance in metres (can be used multiple times)
    #[arg(long = "distance", value_name = "METRES", action = ArgAction::Append, value_parser = parse_sweep_value)]
    pub distances: Vec<f64>,

    /// Use a compiled-in set of data rates and distances
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Command that launches the simulator
    #[arg(long)]
    pub launcher: Option<String>,

    /// Scenario name passed to --run
    #[arg(long)]
    pub scenario: Option<String>,

    /// Program placeholder inside --command-template
    #[arg(long)]
    pub program: Option<String>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any invocation failed (the sweep still runs to the end)
    #[arg(long)]
    pub strict: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Runs: {}..={}\n", self.initial_run, self.final_run));
        if let Some(preset) = self.preset {
            summary.push_str(&format!("  Preset: {:?}\n", preset));
        }
        if !self.rates.is_empty() {
            summary.push_str(&format!("  Data rates: {}\n", join_values(&self.rates)));
        }
        if !self.distances.is_empty() {
            summary.push_str(&format!("  Distances: {}\n", join_values(&self.distances)));
        }
        if let Some(ref launcher) = self.launcher {
            summary.push_str(&format!("  Launcher: {}\n", launcher));
        }
        if let Some(ref scenario) = self.scenario {
            summary.push_str(&format!("  Scenario: {}\n", scenario));
        }
        summary.push_str(&format!("  Dry run: {}\n", self.dry_run));
        summary.push_str(&format!("  Strict: {}\n", self.strict));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));

        summary
    }
}

fn join_values(values: &[f64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse a data-rate or distance value
fn parse_sweep_value(s: &str) -> Result<f64, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid number: {}", s))?;

    if !value.is_finite() {
        Err(format!("Value must be finite: {}", s))
    } else if value < 0.0 {
        Err(format!("Value cannot be negative: {}", s))
    } else {
        Ok(value)
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
