//! Detached launch of the benchmark process.
//!
//! [`Launcher::plan`] resolves the interpreter and assembles the command line
//! without touching the filesystem; [`Launcher::spawn`] truncates (or creates)
//! both log files, starts the child in its own process group with stdin
//! detached, and returns immediately without waiting for it.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::command::BenchCommand;
use crate::config::LaunchConfig;
use crate::error::{LaunchError, Result};
use crate::interpreter::{InterpreterChoice, InterpreterResolver};

/// Everything needed to start the child, computed without side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPlan {
    /// Selected interpreter.
    pub interpreter: InterpreterChoice,
    /// Arguments after the interpreter.
    pub args: Vec<String>,
    /// Resolved stdout log path.
    pub stdout_log: PathBuf,
    /// Resolved stderr log path.
    pub stderr_log: PathBuf,
    /// Resolved pid file path, if configured.
    pub pid_file: Option<PathBuf>,
    /// Full command line for display.
    pub command_line: String,
}

/// Outcome of a successful launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchReport {
    /// Selected interpreter.
    pub interpreter: InterpreterChoice,
    /// Arguments after the interpreter.
    pub args: Vec<String>,
    /// OS process id of the detached child.
    pub pid: u32,
    /// File receiving the child's stdout.
    pub stdout_log: PathBuf,
    /// File receiving the child's stderr.
    pub stderr_log: PathBuf,
    /// File holding `pid`, if configured.
    pub pid_file: Option<PathBuf>,
}

/// Starts the benchmark program as a detached background process.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LaunchConfig,
    command: BenchCommand,
}

impl Launcher {
    /// Creates a launcher for the given configuration.
    pub fn new(config: LaunchConfig) -> Self {
        let command = BenchCommand::from_config(&config);
        Self { config, command }
    }

    /// Resolves the interpreter (exactly once) and assembles the command line.
    pub fn plan(&self) -> LaunchPlan {
        let interpreter = InterpreterResolver::new(&self.config.interpreter).resolve();
        tracing::info!(
            interpreter = %interpreter.name,
            kind = %interpreter.kind,
            program = %interpreter.program.display(),
            "interpreter selected"
        );
        LaunchPlan {
            command_line: self.command.display_line(&interpreter),
            args: self.command.args(),
            stdout_log: self.config.resolve_path(&self.config.stdout_log),
            stderr_log: self.config.resolve_path(&self.config.stderr_log),
            pid_file: self
                .config
                .pid_file
                .as_deref()
                .map(|p| self.config.resolve_path(p)),
            interpreter,
        }
    }

    /// Plans and spawns in one step.
    ///
    /// # Errors
    ///
    /// See [`Launcher::spawn`].
    pub fn launch(&self) -> Result<LaunchReport> {
        let plan = self.plan();
        self.spawn(&plan)
    }

    /// Starts the child described by `plan` and returns without waiting.
    ///
    /// # Errors
    ///
    /// - [`LaunchError::LogFile`] if a log file cannot be created.
    /// - [`LaunchError::Spawn`] if the interpreter cannot be executed.
    /// - [`LaunchError::PidFile`] if the pid file cannot be written. The
    ///   child is already running at that point and the error carries its pid.
    // The child is never waited on: it outlives the launcher and is reparented
    // when the launcher exits.
    #[allow(clippy::zombie_processes)]
    pub fn spawn(&self, plan: &LaunchPlan) -> Result<LaunchReport> {
        let stdout = create_log(&plan.stdout_log)?;
        let stderr = create_log(&plan.stderr_log)?;

        let mut cmd = self
            .command
            .to_command(&plan.interpreter, self.config.workdir.as_deref());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: plan.interpreter.program.clone(),
            source,
        })?;
        let pid = child.id();
        tracing::info!(
            pid,
            stdout_log = %plan.stdout_log.display(),
            stderr_log = %plan.stderr_log.display(),
            "benchmark started in background"
        );

        if let Some(path) = &plan.pid_file {
            std::fs::write(path, format!("{pid}\n")).map_err(|source| LaunchError::PidFile {
                path: path.clone(),
                pid,
                source,
            })?;
            tracing::debug!(path = %path.display(), "pid file written");
        }

        Ok(LaunchReport {
            interpreter: plan.interpreter.clone(),
            args: plan.args.clone(),
            pid,
            stdout_log: plan.stdout_log.clone(),
            stderr_log: plan.stderr_log.clone(),
            pid_file: plan.pid_file.clone(),
        })
    }
}

/// Create or truncate a redirection target.
fn create_log(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| LaunchError::LogFile {
        path: path.to_path_buf(),
        source,
    })
}
