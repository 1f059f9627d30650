//! Configuration management module

pub mod parser;

pub use parser::{display_config_summary, load_config, ConfigParser};

// Re-export from models for convenience
pub use crate::models::SweepConfig;
