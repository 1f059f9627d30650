//! WAVE Sweep
//!
//! Drives the ns-3 `wave-udp-e2e` scenario across a parameter sweep of
//! application data rates, node distances and run/seed indices, launching
//! the simulator once per combination and waiting for each run to finish.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod sweep;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{CommandRunner, DryRunRunner, ShellRunner, StdoutRoute};
pub use models::{ExitState, InvocationOutcome, Preset, SweepConfig, SweepReport};
pub use sweep::{run_sweep, CommandTemplate, SweepDispatcher, SweepPlan, SweepPoint};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default sweep values
pub mod defaults {
    /// ns-3 build/run wrapper, relative to the ns-3 source tree
    pub const DEFAULT_LAUNCHER: &str = "./waf";
    pub const DEFAULT_SCENARIO: &str = "wave-udp-e2e";
    /// waf replaces `%s` with the path of the scenario binary
    pub const DEFAULT_PROGRAM: &str = "%s";

    /// Inter-packet interval in microseconds
    pub const DEFAULT_DATA_RATES: &[f64] = &[8e5];
    /// Node separation in metres
    pub const DEFAULT_DISTANCES: &[f64] = &[50.0];

    /// 10 kb/s, 1 Mb/s, 10 Mb/s, 100 Mb/s, 1 Gb/s
    pub const FULL_DATA_RATES: &[f64] = &[8e5, 8e3, 800.0, 80.0, 8.0];
    pub const FULL_DISTANCES: &[f64] = &[
        2.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 115.0,
        120.0, 125.0, 130.0, 135.0, 140.0, 145.0, 150.0, 160.0,
    ];

    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
