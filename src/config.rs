//! Configuration types for the benchmark launcher.
//!
//! Every value the launcher needs has a built-in default that reproduces the
//! stock behaviour: prefer `pypy` over `python`, run
//! `./benchmark.py -g=4.4 -cr -r -e -th=36` and redirect the child's output
//! to `bench.log` / `bench.err`. A TOML file may override any of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::{LaunchError, Result};
use crate::timeout::TimeoutSpec;

/// Environment variable naming a config file to load when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "BENCHRUN_CONFIG";

/// Top-level launcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Benchmark program passed to the interpreter.
    pub script: PathBuf,
    /// Benchmark flags, forwarded verbatim before the timeout flag.
    pub flags: Vec<String>,
    /// Destination of the child's standard output.
    pub stdout_log: PathBuf,
    /// Destination of the child's standard error.
    pub stderr_log: PathBuf,
    /// Working directory for the child (None = current directory).
    ///
    /// Relative log and pid file paths are resolved against it.
    pub workdir: Option<PathBuf>,
    /// Optional file receiving the child's pid.
    pub pid_file: Option<PathBuf>,
    /// Interpreter probing settings.
    pub interpreter: InterpreterConfig,
    /// Timeout forwarded to the benchmark.
    pub timeout: TimeoutSpec,
    /// Extra environment variables set for the child.
    pub env: BTreeMap<String, String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("./benchmark.py"),
            flags: ["-g=4.4", "-cr", "-r", "-e"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            stdout_log: PathBuf::from("bench.log"),
            stderr_log: PathBuf::from("bench.err"),
            workdir: None,
            pid_file: None,
            interpreter: InterpreterConfig::default(),
            timeout: TimeoutSpec::default(),
            env: BTreeMap::new(),
        }
    }
}

/// Interpreter selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// High-performance interpreter used when present on the search path.
    pub preferred: String,
    /// Interpreter used otherwise.
    pub fallback: String,
    /// Search path for the lookup (None = the `PATH` environment variable).
    ///
    /// Only the probe uses it. A fallback that is not found here is spawned
    /// by bare name, which the OS resolves against the launcher's own `PATH`.
    pub search_path: Option<String>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            preferred: "pypy".to_owned(),
            fallback: "python".to_owned(),
            search_path: None,
        }
    }
}

impl LaunchConfig {
    /// Load configuration from a TOML file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| LaunchError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LaunchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config file named by `explicit`, falling back to [`CONFIG_ENV_VAR`].
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Config`] for empty names or colliding log
    /// paths, and [`LaunchError::InvalidTimeout`] for a bad timeout.
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.preferred.trim().is_empty()
            || self.interpreter.fallback.trim().is_empty()
        {
            return Err(LaunchError::Config(
                "interpreter names must not be empty".to_owned(),
            ));
        }
        if self.script.as_os_str().is_empty() {
            return Err(LaunchError::Config("script must not be empty".to_owned()));
        }
        let stdout_log = normalize(&self.resolve_path(&self.stdout_log));
        if stdout_log == normalize(&self.resolve_path(&self.stderr_log)) {
            return Err(LaunchError::Config(format!(
                "stdout_log and stderr_log both point to {}",
                stdout_log.display()
            )));
        }
        self.timeout.validate()
    }

    /// Resolve `path` against the configured working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.workdir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Drop `.` components so `bench.log` and `./bench.log` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
