//! benchrun: detached launcher for the `benchmark.py` clustering benchmark.
//!
//! Selects an interpreter (`pypy` when available, `python` otherwise),
//! assembles the benchmark command line with its fixed flags and timeout,
//! and starts it in the background with stdout and stderr redirected to log
//! files. The launcher never waits for the benchmark to finish.
//!
//! # Architecture
//!
//! - **Config**: TOML-backed [`LaunchConfig`] whose defaults reproduce the
//!   stock launch
//! - **Interpreter**: search-path probing with fallback
//! - **Command**: the child's argument list, timeout flag last
//! - **Launcher**: log preparation and the detached spawn

pub mod command;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod timeout;

pub use command::BenchCommand;
pub use config::LaunchConfig;
pub use error::{LaunchError, Result};
pub use interpreter::{InterpreterChoice, InterpreterKind, InterpreterResolver};
pub use launcher::{LaunchPlan, LaunchReport, Launcher};
pub use timeout::{TimeUnit, TimeoutSpec};
