//! Tests for the `benchrun` binary.

use crate::helpers::{Sandbox, kill_pid, wait_for_contents, write_interpreter};
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

fn benchrun(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_benchrun"));
    cmd.arg("--config").arg(config).env_remove("BENCHRUN_CONFIG");
    cmd
}

#[test]
fn prints_selected_interpreter_and_exits_immediately() {
    let sandbox = Sandbox::new();
    write_interpreter(&sandbox.bin_dir(), "fakepypy");
    let mut config = sandbox.config();
    config.env.insert("BENCH_SLEEP".to_owned(), "30".to_owned());
    config.pid_file = Some("bench.pid".into());
    let path = sandbox.root.path().join("benchrun.toml");
    config.save_to_file(&path).unwrap();

    let started = Instant::now();
    let output = benchrun(&path).output().unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Starting benchmark under fakepypy...\n");

    let pid_file = sandbox.work_dir().join("bench.pid");
    let pid = wait_for_contents(&pid_file, Duration::from_secs(5), |s| !s.is_empty());
    kill_pid(pid.trim().parse().unwrap());
}

#[test]
fn dry_run_creates_no_logs() {
    let sandbox = Sandbox::new();
    write_interpreter(&sandbox.bin_dir(), "fakepython");
    let path = sandbox.root.path().join("benchrun.toml");
    sandbox.config().save_to_file(&path).unwrap();

    let output = benchrun(&path).arg("--dry-run").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("fakepython ./benchmark.py -g=4.4 -cr -r -e -th=36"),
        "stdout: {stdout}"
    );
    assert!(!sandbox.work_dir().join("bench.log").exists());
    assert!(!sandbox.work_dir().join("bench.err").exists());
    assert!(!sandbox.work_dir().join("spawns.txt").exists());
}

#[test]
fn json_report_includes_pid_and_logs() {
    let sandbox = Sandbox::new();
    write_interpreter(&sandbox.bin_dir(), "fakepypy");
    let path = sandbox.root.path().join("benchrun.toml");
    sandbox.config().save_to_file(&path).unwrap();

    let output = benchrun(&path).arg("--json").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (first, rest) = stdout.split_once('\n').unwrap();
    assert_eq!(first, "Starting benchmark under fakepypy...");
    let report: serde_json::Value = serde_json::from_str(rest).unwrap();
    assert!(report["pid"].as_u64().unwrap() > 0);
    assert_eq!(report["interpreter"]["kind"], "preferred");
    assert_eq!(report["args"][5], "-th=36");
}

#[test]
fn spawn_failure_exits_nonzero() {
    let sandbox = Sandbox::new();
    let path = sandbox.root.path().join("benchrun.toml");
    sandbox.config().save_to_file(&path).unwrap();

    let output = benchrun(&path).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to spawn"), "stderr: {stderr}");
}

#[test]
fn config_env_var_is_used_without_flag() {
    let sandbox = Sandbox::new();
    write_interpreter(&sandbox.bin_dir(), "fakepython");
    let path = sandbox.root.path().join("benchrun.toml");
    sandbox.config().save_to_file(&path).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_benchrun"))
        .env("BENCHRUN_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Starting benchmark under fakepython...\n");
    let log = wait_for_contents(
        &sandbox.work_dir().join("bench.log"),
        Duration::from_secs(10),
        |s| s.contains("-th=36"),
    );
    assert!(log.starts_with("./benchmark.py"), "log: {log}");
}

#[test]
fn pid_file_failure_names_the_running_child() {
    let sandbox = Sandbox::new();
    write_interpreter(&sandbox.bin_dir(), "fakepypy");
    let mut config = sandbox.config();
    config.pid_file = Some("no-such-dir/bench.pid".into());
    let path = sandbox.root.path().join("benchrun.toml");
    config.save_to_file(&path).unwrap();

    let output = benchrun(&path).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to write pid file"), "stderr: {stderr}");
    assert!(stderr.contains("benchmark already running as pid"), "stderr: {stderr}");

    let spawns = wait_for_contents(
        &sandbox.work_dir().join("spawns.txt"),
        Duration::from_secs(10),
        |s| !s.is_empty(),
    );
    assert_eq!(spawns.lines().count(), 1, "spawns: {spawns}");
}
