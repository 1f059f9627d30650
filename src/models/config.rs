//! Sweep configuration data model and validation

use crate::defaults;
use crate::error::{AppError, Result};
use crate::sweep::{CommandTemplate, SweepPlan};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Compiled-in data-rate/distance value sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// One data rate, one distance
    #[default]
    Default,
    /// Full grid: five data rates by twenty-two distances
    Full,
}

impl Preset {
    pub fn data_rates(&self) -> Vec<f64> {
        match self {
            Preset::Default => defaults::DEFAULT_DATA_RATES.to_vec(),
            Preset::Full => defaults::FULL_DATA_RATES.to_vec(),
        }
    }

    pub fn distances(&self) -> Vec<f64> {
        match self {
            Preset::Default => defaults::DEFAULT_DISTANCES.to_vec(),
            Preset::Full => defaults::FULL_DISTANCES.to_vec(),
        }
    }
}

/// Main sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Application data-rate values, iterated outermost
    pub data_rates: Vec<f64>,

    /// Node distance values, iterated second
    pub distances: Vec<f64>,

    /// First run index (inclusive)
    pub start_run: i64,

    /// Last run index (inclusive)
    pub end_run: i64,

    /// Command that starts the simulator
    pub launcher: String,

    /// Scenario passed to `--run`
    pub scenario: String,

    /// Program placeholder inside `--command-template`
    pub program: String,

    /// Print commands instead of executing them
    #[serde(default)]
    pub dry_run: bool,

    /// Fail the process when any invocation fails
    #[serde(default)]
    pub strict: bool,

    /// Emit the final summary as JSON
    #[serde(default)]
    pub json_summary: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            data_rates: Preset::Default.data_rates(),
            distances: Preset::Default.distances(),
            start_run: 1,
            end_run: 1,
            launcher: defaults::DEFAULT_LAUNCHER.to_string(),
            scenario: defaults::DEFAULT_SCENARIO.to_string(),
            program: defaults::DEFAULT_PROGRAM.to_string(),
            dry_run: false,
            strict: false,
            json_summary: false,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both value sets with those of a preset
    pub fn apply_preset(&mut self, preset: Preset) {
        self.data_rates = preset.data_rates();
        self.distances = preset.distances();
    }

    /// Immutable iteration plan for the dispatcher
    pub fn plan(&self) -> SweepPlan {
        SweepPlan::new(
            self.data_rates.clone(),
            self.distances.clone(),
            self.start_run,
            self.end_run,
        )
    }

    /// Command template built from launcher, scenario and program
    pub fn template(&self) -> CommandTemplate {
        CommandTemplate::new(&self.launcher, &self.scenario, &self.program)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        for rate in &self.data_rates {
            check_value("data rate", *rate)?;
            check_packet_interval(*rate)?;
        }

        for distance in &self.distances {
            check_value("distance", *distance)?;
        }

        if self.launcher.trim().is_empty() {
            return Err(AppError::config("Launcher cannot be empty"));
        }

        if self.scenario.trim().is_empty() {
            return Err(AppError::config("Scenario name cannot be empty"));
        }

        if self.scenario.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(AppError::config(format!(
                "Scenario name must not contain whitespace or quotes: {}",
                self.scenario
            )));
        }

        if self.program.trim().is_empty() {
            return Err(AppError::config("Program placeholder cannot be empty"));
        }

        // The program sits inside a double-quoted shell word
        if self.program.contains('"') {
            return Err(AppError::config(format!(
                "Program placeholder must not contain double quotes: {}",
                self.program
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup, using the `SWEEP_*` names
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rates) = lookup("SWEEP_DATA_RATES") {
            self.data_rates = parse_number_list("SWEEP_DATA_RATES", &rates)?;
        }

        if let Some(distances) = lookup("SWEEP_DISTANCES") {
            self.distances = parse_number_list("SWEEP_DISTANCES", &distances)?;
        }

        if let Some(launcher) = lookup("SWEEP_LAUNCHER") {
            self.launcher = launcher.trim().to_string();
        }

        if let Some(scenario) = lookup("SWEEP_SCENARIO") {
            self.scenario = scenario.trim().to_string();
        }

        if let Some(program) = lookup("SWEEP_PROGRAM") {
            self.program = program.trim().to_string();
        }

        Ok(())
    }
}

/// Parse a comma-separated list of numbers, skipping blank entries
pub fn parse_number_list(name: &str, value: &str) -> Result<Vec<f64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| AppError::config(format!("Invalid {} entry '{}': {}", name, s, e)))
        })
        .collect()
}

fn check_value(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{} must be finite, got {}", what, value)));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!("{} cannot be negative, got {}", what, value)));
    }
    Ok(())
}

/// `--intPck` is a `uint32_t` microsecond interval in the scenario
fn check_packet_interval(rate: f64) -> Result<()> {
    if rate.fract() != 0.0 || rate > f64::from(u32::MAX) {
        return Err(AppError::validation(format!(
            "data rate must be a whole number of microseconds between 0 and {}, got {}",
            u32::MAX,
            rate
        )));
    }
    Ok(())
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}
