//! WAVE Sweep - Main CLI Application
//!
//! Launches the ns-3 `wave-udp-e2e` scenario once per (data rate, distance,
//! run) combination and waits for each run before starting the next.

use clap::Parser;
use std::error::Error;
use std::process;
use wave_sweep::{
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, Result},
    executor::create_runner,
    logging::LoggerFactory,
    output::{report_to_json, OutputCoordinator, OutputFormatterFactory},
    sweep::SweepDispatcher,
    PKG_NAME, VERSION,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let use_color = cli.use_colors();
    let verbose = cli.verbose;

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        if verbose {
            eprintln!();
            eprintln!("{}", e.user_friendly_message());
        }

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        eprintln!(
            "{} v{} (built {}, commit {})",
            PKG_NAME,
            VERSION,
            option_env!("BUILD_TIME").unwrap_or("unknown"),
            option_env!("GIT_COMMIT").unwrap_or("unknown")
        );
        eprintln!("{}", cli.get_config_summary());
    }

    let config = load_config(cli)?;

    let factory = LoggerFactory::new(config.clone());
    let logger = factory.create_logger("MAIN");
    wave_sweep::log_debug!(logger, "Configuration loaded:\n{}", display_config_summary(&config));

    // With --json, child output and dry-run listings move to stderr
    let runner = create_runner(&config);
    let dispatcher = SweepDispatcher::new(config.template(), runner)
        .with_logger(factory.create_sweep_logger());

    let report = dispatcher.run_sweep(&config.plan()).await;

    if config.json_summary {
        println!("{}", report_to_json(&report)?);
    } else if !config.dry_run {
        let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
        let coordinator = OutputCoordinator::new(formatter);
        // stdout carries simulator output; keep the summary on stderr
        eprintln!("{}", coordinator.display_report(&report)?);
    }

    if config.strict {
        report.ensure_all_succeeded()?;
    } else if report.failed() > 0 {
        logger
            .info("Ignoring failed invocations; pass --strict to turn them into an error")
            .error_info(&AppError::SweepFailures {
                failed: report.failed(),
                total: report.total(),
            })
            .log();
    }

    Ok(())
}
