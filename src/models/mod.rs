//! Data models for the sweep driver

pub mod config;
pub mod outcome;

// Re-export main model types
pub use config::{Preset, SweepConfig};
pub use outcome::{ExitState, InvocationOutcome, SweepReport};
