//! Error types for the benchmark launcher.

use std::path::PathBuf;

/// Top-level error type for launching the benchmark.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// Configuration file could not be parsed or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Timeout magnitude is negative or not a finite number.
    #[error("invalid timeout value: {value}")]
    InvalidTimeout {
        /// The rejected magnitude.
        value: f64,
    },

    /// One of the redirection targets could not be created.
    #[error("failed to create log file {}: {source}", path.display())]
    LogFile {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The operating system refused to start the child process.
    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        /// Interpreter program that was executed.
        program: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The child's pid could not be recorded. The child is already running.
    #[error(
        "failed to write pid file {}: {source} (benchmark already running as pid {pid})",
        path.display()
    )]
    PidFile {
        /// Pid file path.
        path: PathBuf,
        /// Pid of the running child.
        pid: u32,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, LaunchError>;
