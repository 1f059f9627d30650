//! Leveled logging for the sweep driver
//!
//! Console or JSON lines with structured fields and a per-process session id.
//! Everything goes to stderr: stdout belongs to the simulator, to dry-run
//! command listings and to the `--json` report.

use crate::error::AppError;
use crate::models::{InvocationOutcome, SweepConfig, SweepReport};
use crate::sweep::{CommandTemplate, SweepPlan, SweepPoint};
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }

    fn color(&self) -> Color {
        match self {
            LogLevel::Debug => Color::Cyan,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
        }
    }

    /// Threshold implied by `--verbose` / `--debug`
    pub fn for_config(config: &SweepConfig) -> Self {
        if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }
}

/// One structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub logger: String,
    pub fields: HashMap<String, serde_json::Value>,
    pub location: Option<LogLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Console,
    /// One JSON object per line, used alongside `--json`
    Json,
}

pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    include_location: bool,
    format: LogFormat,
    name: String,
    session_id: Option<String>,
}

impl Logger {
    pub fn with_config(name: &str, config: &SweepConfig) -> Self {
        Self {
            min_level: LogLevel::for_config(config),
            use_color: config.enable_color,
            include_location: config.debug,
            format: if config.json_summary { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            session_id: None,
        }
    }

    /// Tag every entry with a correlation id
    pub fn with_session_id(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Info, message)
    }

    fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        if let Some(session_id) = &self.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::json!(session_id));
        }

        let _ = writeln!(io::stderr(), "{}", self.format_entry(&entry));
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => serde_json::to_string(entry)
                .unwrap_or_else(|_| format!("{{\"message\": {:?}}}", entry.message)),
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let level = format!("{:>5}", entry.level.as_str());
        let level = if self.use_color {
            level.color(entry.level.color()).to_string()
        } else {
            level
        };

        let mut output = format!(
            "{} {} [{}] {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            // Sorted so repeated runs produce comparable lines
            let mut fields: Vec<_> = entry.fields.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let rendered: Vec<String> = fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            output.push_str(&format!(" {{{}}}", rendered.join(", ")));
        }

        if let (true, Some(location)) = (self.include_location, &entry.location) {
            output.push_str(&format!(" @ {}:{}", location.file, location.line));
        }

        output
    }
}

/// Accumulates fields for one entry; nothing is written until [`log`](Self::log)
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Add the coordinates of a sweep point
    pub fn point(self, point: &SweepPoint) -> Self {
        self.field("data_rate", point.data_rate)
            .field("distance", point.distance)
            .field("run", point.run)
            .field("seed", point.seed())
    }

    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    pub fn log(self) {
        self.logger.write_entry(self.entry);
    }
}

/// Progress logging for a running sweep
pub struct SweepLogger {
    logger: Logger,
}

impl SweepLogger {
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            logger: Logger::with_config("SWEEP", config),
        }
    }

    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn log_sweep_start(&self, plan: &SweepPlan, template: &CommandTemplate, runner: &str) {
        if plan.is_empty() {
            self.logger
                .info("Sweep is empty, nothing to launch")
                .field("data_rates", plan.data_rates())
                .field("distances", plan.distances())
                .field("start_run", plan.start_run())
                .field("end_run", plan.end_run())
                .log();
            return;
        }

        let message = format!(
            "Starting sweep: {} data rates x {} distances x {} runs = {} invocations",
            plan.data_rates().len(),
            plan.distances().len(),
            plan.runs_per_point(),
            plan.len()
        );

        self.logger
            .info(&message)
            .field("launcher", template.launcher())
            .field("scenario", template.scenario())
            .field("runner", runner)
            .log();
    }

    pub fn log_invocation_start(&self, index: usize, total: usize, point: &SweepPoint, command: &str) {
        self.logger
            .info(&format!("[{}/{}] {}", index, total, command))
            .point(point)
            .log();
    }

    pub fn log_invocation_end(&self, index: usize, total: usize, outcome: &InvocationOutcome) {
        let level = if outcome.is_success() { LogLevel::Debug } else { LogLevel::Warn };
        let message = format!(
            "[{}/{}] run {} finished: {} in {:.3}s",
            index,
            total,
            outcome.point.run,
            outcome.state.label(),
            outcome.duration.as_secs_f64()
        );

        self.logger
            .log(level, &message)
            .point(&outcome.point)
            .field("state", &outcome.state)
            .field("duration_ms", outcome.duration.as_secs_f64() * 1000.0)
            .log();
    }

    pub fn log_sweep_summary(&self, report: &SweepReport) {
        let level = if report.failed() > 0 { LogLevel::Warn } else { LogLevel::Info };
        let message = format!(
            "Sweep finished: {} invocations, {} succeeded, {} failed in {:.3}s",
            report.total(),
            report.succeeded(),
            report.failed(),
            report.total_duration.as_secs_f64()
        );

        self.logger
            .log(level, &message)
            .field("total", report.total())
            .field("succeeded", report.succeeded())
            .field("failed", report.failed())
            .log();
    }
}

/// Hands out loggers sharing one session id
pub struct LoggerFactory {
    config: SweepConfig,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn create_logger(&self, name: &str) -> Logger {
        Logger::with_config(name, &self.config).with_session_id(&self.session_id)
    }

    pub fn create_sweep_logger(&self) -> SweepLogger {
        SweepLogger::from_logger(self.create_logger("SWEEP"))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Debug entry tagged with the call site
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
    };
}
