//! End-to-end CLI tests
//!
//! A small shell script stands in for the simulator launcher and appends
//! its arguments to a log file, so each test can check exactly which
//! invocations happened and in what order.

#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary stub launcher plus the log it writes to
struct StubLauncher {
    _dir: TempDir,
    script: PathBuf,
    log: PathBuf,
}

impl StubLauncher {
    fn new(exit_code: i32) -> Self {
        Self::with_banner(exit_code, "")
    }

    /// Like waf, print a line to stdout before running
    fn chatty(exit_code: i32) -> Self {
        Self::with_banner(exit_code, "echo \"Waf: Entering directory build\"\n")
    }

    fn with_banner(exit_code: i32, banner: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("stub.sh");
        let log = dir.path().join("calls.log");
        let body = format!(
            "#!/bin/sh\n{}printf '%s|%s|%s\\n' \"$1\" \"$2\" \"$3\" >> '{}'\nexit {}\n",
            banner,
            log.display(),
            exit_code
        );
        fs::write(&script, body).unwrap();
        Self {
            _dir: dir,
            script,
            log,
        }
    }

    fn launcher(&self) -> String {
        format!("sh '{}'", self.script.display())
    }

    fn calls(&self) -> Vec<String> {
        read_lines(&self.log)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(String::from).collect(),
        Err(_) => Vec::new(),
    }
}

fn sweep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wave-sweep").unwrap();
    for key in ["SWEEP_DATA_RATES", "SWEEP_DISTANCES", "SWEEP_LAUNCHER", "SWEEP_SCENARIO", "SWEEP_PROGRAM"] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_runs_each_index_in_order() {
    let stub = StubLauncher::new(0);

    sweep_cmd()
        .args(["3", "5", "--no-color", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .success()
        .stderr(predicate::str::contains("Invocations: 3"));

    assert_eq!(
        stub.calls(),
        vec![
            "--run|wave-udp-e2e|--command-template=%s --RngRun=3 --RngSeed=3 --distance=50 --intPck=800000",
            "--run|wave-udp-e2e|--command-template=%s --RngRun=4 --RngSeed=4 --distance=50 --intPck=800000",
            "--run|wave-udp-e2e|--command-template=%s --RngRun=5 --RngSeed=5 --distance=50 --intPck=800000",
        ]
    );
}

#[test]
fn test_rate_major_order() {
    let stub = StubLauncher::new(0);

    sweep_cmd()
        .args(["1", "2", "--no-color", "--rate", "800", "--rate", "8", "--distance", "10", "--distance", "20"])
        .arg("--launcher")
        .arg(stub.launcher())
        .assert()
        .success();

    let points: Vec<String> = stub
        .calls()
        .iter()
        .map(|line| {
            let template = line.rsplit('|').next().unwrap_or_default();
            template.replace("--command-template=%s ", "")
        })
        .collect();

    assert_eq!(
        points,
        vec![
            "--RngRun=1 --RngSeed=1 --distance=10 --intPck=800",
            "--RngRun=2 --RngSeed=2 --distance=10 --intPck=800",
            "--RngRun=1 --RngSeed=1 --distance=20 --intPck=800",
            "--RngRun=2 --RngSeed=2 --distance=20 --intPck=800",
            "--RngRun=1 --RngSeed=1 --distance=10 --intPck=8",
            "--RngRun=2 --RngSeed=2 --distance=10 --intPck=8",
            "--RngRun=1 --RngSeed=1 --distance=20 --intPck=8",
            "--RngRun=2 --RngSeed=2 --distance=20 --intPck=8",
        ]
    );
}

#[test]
fn test_failures_are_ignored_by_default() {
    let stub = StubLauncher::new(1);

    sweep_cmd()
        .args(["1", "4", "--no-color", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed invocations:"))
        .stderr(predicate::str::contains("exit 1"));

    assert_eq!(stub.calls().len(), 4);
}

#[test]
fn test_strict_mode_reports_failures_after_full_sweep() {
    let stub = StubLauncher::new(2);

    sweep_cmd()
        .args(["1", "4", "--no-color", "--strict", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("4 of 4 simulator invocations failed"));

    assert_eq!(stub.calls().len(), 4);
}

#[test]
fn test_strict_mode_passes_when_all_succeed() {
    let stub = StubLauncher::new(0);

    sweep_cmd()
        .args(["1", "2", "--no-color", "--strict", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .success();

    assert_eq!(stub.calls().len(), 2);
}

#[test]
fn test_inverted_range_launches_nothing() {
    let stub = StubLauncher::new(0);

    sweep_cmd()
        .args(["5", "3", "--no-color", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .success()
        .stderr(predicate::str::contains("No invocations"));

    assert!(stub.calls().is_empty());
}

#[test]
fn test_dry_run_prints_commands_only() {
    let stub = StubLauncher::new(0);
    let launcher = stub.launcher();
    let expected = format!(
        "{} --run wave-udp-e2e --command-template=\"%s --RngRun=1 --RngSeed=1 --distance=50 --intPck=800000\"",
        launcher
    );

    sweep_cmd()
        .args(["1", "1", "--dry-run", "--launcher"])
        .arg(&launcher)
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));

    assert!(stub.calls().is_empty());
}

#[test]
fn test_environment_values() {
    let output = sweep_cmd()
        .args(["1", "1", "--dry-run"])
        .env("SWEEP_DISTANCES", "10, 20")
        .env("SWEEP_DATA_RATES", "8e3")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("./waf --run wave-udp-e2e "));
    assert!(lines[0].ends_with("--distance=10 --intPck=8000\""));
    assert!(lines[1].ends_with("--distance=20 --intPck=8000\""));
}

#[test]
fn test_full_preset_size() {
    let output = sweep_cmd()
        .args(["1", "2", "--dry-run", "--preset", "full"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 5 * 22 * 2);
}

#[test]
fn test_json_summary() {
    let stub = StubLauncher::new(3);

    let output = sweep_cmd()
        .args(["7", "8", "--json", "--launcher"])
        .arg(stub.launcher())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["point"]["run"], 7);
    assert_eq!(outcomes[1]["state"]["code"], 3);
}

#[test]
fn test_json_report_survives_simulator_stdout() {
    let stub = StubLauncher::chatty(0);

    let output = sweep_cmd()
        .args(["1", "2", "--json", "--launcher"])
        .arg(stub.launcher())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcomes"].as_array().unwrap().len(), 2);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Waf: Entering directory build").count(), 2);
    assert_eq!(stub.calls().len(), 2);
}

#[test]
fn test_json_dry_run_lists_commands_on_stderr() {
    let output = sweep_cmd()
        .args(["1", "1", "--json", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcomes"][0]["point"]["run"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("./waf --run wave-udp-e2e --command-template="));
}

#[test]
fn test_bad_arguments_fail_before_running() {
    let stub = StubLauncher::new(0);

    sweep_cmd()
        .args(["one", "2", "--launcher"])
        .arg(stub.launcher())
        .assert()
        .failure();

    sweep_cmd().arg("1").assert().failure();

    sweep_cmd()
        .args(["1", "2", "--launcher"])
        .arg(stub.launcher())
        .env("SWEEP_DISTANCES", "near,far")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SWEEP_DISTANCES"));

    // intPck is an unsigned 32-bit microsecond count
    for rate in ["12.5", "4294967296"] {
        sweep_cmd()
            .args(["1", "2", "--rate", rate, "--launcher"])
            .arg(stub.launcher())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("data rate must be a whole number"));
    }

    assert!(stub.calls().is_empty());
}
