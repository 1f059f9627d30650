//! Sweep planning and dispatch
//!
//! A sweep is the Cartesian product of data-rate values, distance values and
//! an inclusive run range. Points are produced rate-major, then by distance,
//! then by ascending run index; each one is rendered into a simulator command
//! and handed to a [`CommandRunner`](crate::executor::CommandRunner).

pub mod dispatcher;

pub use dispatcher::{run_sweep, SweepDispatcher};

use crate::defaults;
use serde::{Deserialize, Serialize};

/// One point of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub data_rate: f64,
    pub distance: f64,
    pub run: i64,
}

impl SweepPoint {
    pub fn new(data_rate: f64, distance: f64, run: i64) -> Self {
        Self {
            data_rate,
            distance,
            run,
        }
    }

    /// RNG seed for this point; always the run index
    pub fn seed(&self) -> i64 {
        self.run
    }
}

/// Immutable description of everything a sweep will launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    data_rates: Vec<f64>,
    distances: Vec<f64>,
    start_run: i64,
    end_run: i64,
}

impl SweepPlan {
    pub fn new(data_rates: Vec<f64>, distances: Vec<f64>, start_run: i64, end_run: i64) -> Self {
        Self {
            data_rates,
            distances,
            start_run,
            end_run,
        }
    }

    pub fn data_rates(&self) -> &[f64] {
        &self.data_rates
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn start_run(&self) -> i64 {
        self.start_run
    }

    pub fn end_run(&self) -> i64 {
        self.end_run
    }

    /// Number of run indices; zero when the range is inverted
    pub fn runs_per_point(&self) -> usize {
        if self.start_run > self.end_run {
            return 0;
        }
        let span = (self.end_run as i128) - (self.start_run as i128) + 1;
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    /// Total number of invocations the plan produces
    pub fn len(&self) -> usize {
        self.data_rates
            .len()
            .saturating_mul(self.distances.len())
            .saturating_mul(self.runs_per_point())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Points in dispatch order
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        let (start, end) = (self.start_run, self.end_run);
        self.data_rates.iter().flat_map(move |&rate| {
            self.distances
                .iter()
                .flat_map(move |&distance| (start..=end).map(move |run| SweepPoint::new(rate, distance, run)))
        })
    }
}

/// Fixed simulator command line with the four per-point parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTemplate {
    launcher: String,
    scenario: String,
    program: String,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_LAUNCHER,
            defaults::DEFAULT_SCENARIO,
            defaults::DEFAULT_PROGRAM,
        )
    }
}

impl CommandTemplate {
    pub fn new(launcher: &str, scenario: &str, program: &str) -> Self {
        Self {
            launcher: launcher.to_string(),
            scenario: scenario.to_string(),
            program: program.to_string(),
        }
    }

    pub fn launcher(&self) -> &str {
        &self.launcher
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render the shell command for one point.
    ///
    /// Numbers use `f64`'s shortest round-trip `Display`, so `8e5` becomes
    /// `800000` and `0.5` stays `0.5`.
    pub fn render(&self, point: &SweepPoint) -> String {
        format!(
            "{} --run {} --command-template=\"{} --RngRun={} --RngSeed={} --distance={} --intPck={}\"",
            self.launcher,
            self.scenario,
            self.program,
            point.run,
            point.seed(),
            point.distance,
            point.data_rate,
        )
    }
}
