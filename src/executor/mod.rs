//! Process execution for sweep points
//!
//! A [`CommandRunner`] launches one rendered simulator command, waits for it
//! and reports how it terminated. It never fails: a shell that cannot be
//! started is reported as [`ExitState::LaunchFailed`] so the sweep can keep
//! going.

use crate::models::{ExitState, SweepConfig};
use async_trait::async_trait;
use std::io::{self, Write};
use std::process::Stdio;
use tokio::process::Command;

/// Where child stdout and dry-run listings are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutRoute {
    /// Share the sweep's own stdout
    #[default]
    Inherit,
    /// Send to stderr so stdout carries only the JSON report
    Stderr,
}

impl StdoutRoute {
    pub fn for_config(config: &SweepConfig) -> Self {
        if config.json_summary {
            StdoutRoute::Stderr
        } else {
            StdoutRoute::Inherit
        }
    }
}

/// Run an external command and capture its exit state
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `command` to completion
    async fn run(&self, command: &str) -> ExitState;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<'a, T: CommandRunner + ?Sized> CommandRunner for &'a T {
    async fn run(&self, command: &str) -> ExitState {
        (**self).run(command).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    async fn run(&self, command: &str) -> ExitState {
        (**self).run(command).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Runs commands through `<shell> -c`, inheriting stdin and stderr
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    stdout: StdoutRoute,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            stdout: StdoutRoute::Inherit,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different shell binary
    pub fn with_shell<S: Into<String>>(shell: S) -> Self {
        Self {
            shell: shell.into(),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: StdoutRoute) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> ExitState {
        let mut child = Command::new(&self.shell);
        child.arg("-c").arg(command);
        if self.stdout == StdoutRoute::Stderr {
            child.stdout(Stdio::from(io::stderr()));
        }

        // No timeout and no kill-on-drop: a hung simulator hangs the sweep
        match child.status().await {
            Ok(status) => ExitState::from(status),
            Err(e) => ExitState::LaunchFailed {
                reason: format!("failed to start {}: {}", self.shell, e),
            },
        }
    }

    fn name(&self) -> &'static str {
        "shell"
    }
}

/// Prints each command instead of running it
#[derive(Debug, Clone, Default)]
pub struct DryRunRunner {
    stdout: StdoutRoute,
}

impl DryRunRunner {
    pub fn with_stdout(stdout: StdoutRoute) -> Self {
        Self { stdout }
    }
}

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, command: &str) -> ExitState {
        // Ignore broken pipes when the listing is piped into `head`
        let _ = match self.stdout {
            StdoutRoute::Inherit => writeln!(io::stdout(), "{}", command),
            StdoutRoute::Stderr => writeln!(io::stderr(), "{}", command),
        };
        ExitState::Success
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

/// Pick the runner for the configured mode
pub fn create_runner(config: &SweepConfig) -> Box<dyn CommandRunner> {
    let stdout = StdoutRoute::for_config(config);
    if config.dry_run {
        Box::new(DryRunRunner::with_stdout(stdout))
    } else {
        Box::new(ShellRunner::new().with_stdout(stdout))
    }
}
