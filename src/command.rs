//! Command line of the benchmark child process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::LaunchConfig;
use crate::interpreter::InterpreterChoice;
use crate::timeout::TimeoutSpec;

/// The benchmark program and its arguments, minus the interpreter.
///
/// Argument order is fixed: script, then the flags verbatim, then the
/// timeout flag last.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchCommand {
    script: PathBuf,
    flags: Vec<String>,
    timeout: TimeoutSpec,
    env: BTreeMap<String, String>,
}

impl BenchCommand {
    /// Builds the command from the launcher configuration.
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self {
            script: config.script.clone(),
            flags: config.flags.clone(),
            timeout: config.timeout,
            env: config.env.clone(),
        }
    }

    /// Arguments passed to the interpreter.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.flags.len() + 2);
        args.push(self.script.to_string_lossy().into_owned());
        args.extend(self.flags.iter().cloned());
        args.push(self.timeout.to_flag());
        args
    }

    /// Human-readable command line, e.g. `pypy ./benchmark.py -g=4.4 ... -th=36`.
    pub fn display_line(&self, interpreter: &InterpreterChoice) -> String {
        let mut parts = vec![interpreter.program.display().to_string()];
        parts.extend(self.args());
        parts.join(" ")
    }

    /// Builds a [`Command`] running the benchmark under `interpreter`.
    ///
    /// Stdio and detachment are left to the caller.
    pub fn to_command(&self, interpreter: &InterpreterChoice, workdir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&interpreter.program);
        cmd.args(self.args()).envs(&self.env);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        cmd
    }
}
