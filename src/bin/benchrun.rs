//! CLI binary for benchrun.
//!
//! With no arguments it starts `benchmark.py` in the background under the
//! best available interpreter and exits immediately.

use anyhow::Context;
use benchrun::{LaunchConfig, Launcher};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Launch the clustering benchmark as a detached background process.
#[derive(Parser)]
#[command(name = "benchrun", version, about)]
struct Cli {
    /// Path to TOML configuration file (defaults to $BENCHRUN_CONFIG).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the resolved command line without creating logs or spawning.
    #[arg(long)]
    dry_run: bool,

    /// Print the launch report as JSON after starting.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries the status line and report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("benchrun=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match LaunchConfig::locate(cli.config.as_deref()) {
        Some(path) => LaunchConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LaunchConfig::default(),
    };

    let launcher = Launcher::new(config);
    let plan = launcher.plan();

    if cli.dry_run {
        println!("{}", plan.command_line);
        println!("stdout -> {}", plan.stdout_log.display());
        println!("stderr -> {}", plan.stderr_log.display());
        return Ok(());
    }

    println!("Starting benchmark under {}...", plan.interpreter.name);

    let report = launcher.spawn(&plan).map_err(|e| {
        tracing::error!(error = %e, "launch failed");
        anyhow::anyhow!("benchrun failed: {e}")
    })?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode launch report")?;
        println!("{json}");
    }

    Ok(())
}
