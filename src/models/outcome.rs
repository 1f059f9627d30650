//! Invocation outcomes and the end-of-sweep report

use crate::error::{AppError, Result};
use crate::sweep::SweepPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::process::ExitStatus;
use std::time::Duration;

/// Termination state of one simulator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExitState {
    /// Exited with status 0
    Success,
    /// Exited with a non-zero status
    Failed { code: i32 },
    /// Killed by a signal before exiting
    Terminated { signal: Option<i32> },
    /// The shell could not be started
    LaunchFailed { reason: String },
}

impl ExitState {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitState::Success)
    }

    /// Short label for tables and log lines
    pub fn label(&self) -> String {
        match self {
            ExitState::Success => "ok".to_string(),
            ExitState::Failed { code } => format!("exit {}", code),
            ExitState::Terminated { signal: Some(sig) } => format!("signal {}", sig),
            ExitState::Terminated { signal: None } => "terminated".to_string(),
            ExitState::LaunchFailed { .. } => "launch failed".to_string(),
        }
    }
}

impl From<ExitStatus> for ExitState {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return ExitState::Success;
        }
        match status.code() {
            Some(code) => ExitState::Failed { code },
            None => ExitState::Terminated {
                signal: exit_signal(&status),
            },
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Result of launching one sweep point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationOutcome {
    pub point: SweepPoint,
    pub command: String,
    pub state: ExitState,
    pub duration: Duration,
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }
}

/// Ordered outcomes of a full sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub total_duration: Duration,
    pub outcomes: Vec<InvocationOutcome>,
}

impl SweepReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            total_duration: Duration::ZERO,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: InvocationOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Turn failed invocations into an error, for callers that want strict handling
    ///
    /// Invocations whose shell never started take precedence over ordinary
    /// non-zero exits, since they point at a broken launcher rather than the
    /// simulator.
    pub fn ensure_all_succeeded(&self) -> Result<()> {
        let unlaunched: Vec<&str> = self
            .outcomes
            .iter()
            .filter_map(|o| match &o.state {
                ExitState::LaunchFailed { reason } => Some(reason.as_str()),
                _ => None,
            })
            .collect();

        if let Some(first) = unlaunched.first() {
            return Err(AppError::launch(format!(
                "{} of {} invocations could not be started: {}",
                unlaunched.len(),
                self.total(),
                first
            )));
        }

        let failed = self.failed();
        if failed > 0 {
            Err(AppError::SweepFailures {
                failed,
                total: self.total(),
            })
        } else {
            Ok(())
        }
    }
}
