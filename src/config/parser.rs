//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    error::{AppError, Result},
    models::SweepConfig,
};

/// Builds a [`SweepConfig`]: defaults, then `SWEEP_*` variables, then CLI flags
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse using the process environment
    pub fn parse(&self) -> Result<SweepConfig> {
        self.parse_with_env(|key| std::env::var(key).ok())
    }

    /// Parse using an explicit environment lookup
    pub fn parse_with_env<F>(&self, lookup: F) -> Result<SweepConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.cli.validate().map_err(AppError::config)?;

        let mut config = SweepConfig::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut SweepConfig) {
        config.start_run = self.cli.initial_run;
        config.end_run = self.cli.final_run;

        if let Some(preset) = self.cli.preset {
            config.apply_preset(preset);
        }

        if !self.cli.rates.is_empty() {
            config.data_rates = self.cli.rates.clone();
        }

        if !self.cli.distances.is_empty() {
            config.distances = self.cli.distances.clone();
        }

        if let Some(ref launcher) = self.cli.launcher {
            config.launcher = launcher.clone();
        }

        if let Some(ref scenario) = self.cli.scenario {
            config.scenario = scenario.clone();
        }

        if let Some(ref program) = self.cli.program {
            config.program = program.clone();
        }

        config.dry_run = self.cli.dry_run;
        config.strict = self.cli.strict;
        config.json_summary = self.cli.json;
        config.enable_color = self.cli.use_colors();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<SweepConfig> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &SweepConfig) -> String {
    let join = |values: &[f64]| {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut summary = Vec::new();
    summary.push(format!("Data rates: [{}]", join(&config.data_rates)));
    summary.push(format!("Distances: [{}]", join(&config.distances)));
    summary.push(format!("Runs: {}..={}", config.start_run, config.end_run));
    summary.push(format!("Invocations: {}", config.plan().len()));
    summary.push(format!("Launcher: {}", config.launcher));
    summary.push(format!("Scenario: {}", config.scenario));
    summary.push(format!("Program: {}", config.program));
    summary.push(format!("Dry run: {}", config.dry_run));
    summary.push(format!("Strict: {}", config.strict));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
