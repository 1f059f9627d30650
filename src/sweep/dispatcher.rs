//! Sequential sweep dispatcher

use super::{CommandTemplate, SweepPlan};
use crate::executor::CommandRunner;
use crate::logging::SweepLogger;
use crate::models::{InvocationOutcome, SweepReport};
use chrono::Utc;
use std::time::Instant;

/// Walks a [`SweepPlan`] and launches every point, one at a time
pub struct SweepDispatcher<R: CommandRunner> {
    template: CommandTemplate,
    runner: R,
    logger: Option<SweepLogger>,
}

impl<R: CommandRunner> SweepDispatcher<R> {
    pub fn new(template: CommandTemplate, runner: R) -> Self {
        Self {
            template,
            runner,
            logger: None,
        }
    }

    /// Attach a logger for per-invocation progress
    pub fn with_logger(mut self, logger: SweepLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Launch every point of `plan` in order.
    ///
    /// Each child is awaited before the next command is built. Exit states
    /// are recorded in the report and otherwise ignored.
    pub async fn run_sweep(&self, plan: &SweepPlan) -> SweepReport {
        let mut report = SweepReport::new(Utc::now());
        let started = Instant::now();
        let total = plan.len();

        if let Some(logger) = &self.logger {
            logger.log_sweep_start(plan, &self.template, self.runner.name());
        }

        for (index, point) in plan.points().enumerate() {
            let command = self.template.render(&point);

            if let Some(logger) = &self.logger {
                logger.log_invocation_start(index + 1, total, &point, &command);
            }

            let began = Instant::now();
            let state = self.runner.run(&command).await;
            let outcome = InvocationOutcome {
                point,
                command,
                state,
                duration: began.elapsed(),
            };

            if let Some(logger) = &self.logger {
                logger.log_invocation_end(index + 1, total, &outcome);
            }

            report.record(outcome);
        }

        report.total_duration = started.elapsed();

        if let Some(logger) = &self.logger {
            logger.log_sweep_summary(&report);
        }

        report
    }
}

/// Run a sweep over explicit values without building a config first
pub async fn run_sweep(
    data_rates: &[f64],
    distances: &[f64],
    start_run: i64,
    end_run: i64,
    template: &CommandTemplate,
    runner: &dyn CommandRunner,
) -> SweepReport {
    let plan = SweepPlan::new(data_rates.to_vec(), distances.to_vec(), start_run, end_run);
    SweepDispatcher::new(template.clone(), runner)
        .run_sweep(&plan)
        .await
}
