//! Interpreter discovery.
//!
//! Probes the search path for the preferred (high-performance) interpreter and
//! falls back to the standard one when it is absent. The probe is a plain
//! existence check: no version validation and no retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::config::InterpreterConfig;

/// Which of the two configured interpreters was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterKind {
    /// The preferred interpreter was found on the search path.
    Preferred,
    /// The preferred interpreter is absent; the fallback is used.
    Fallback,
}

impl fmt::Display for InterpreterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Preferred => "preferred",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// Result of interpreter resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterChoice {
    /// Configured name of the chosen interpreter (e.g. `"pypy"`).
    pub name: String,
    /// Whether the preferred or the fallback interpreter was chosen.
    pub kind: InterpreterKind,
    /// Program to execute: the absolute path when the lookup found it,
    /// otherwise the bare name, left to the OS to resolve at spawn time.
    pub program: PathBuf,
}

/// Resolves the interpreter for the benchmark.
#[derive(Debug, Clone)]
pub struct InterpreterResolver {
    preferred: String,
    fallback: String,
    search_path: Option<String>,
}

impl InterpreterResolver {
    /// Creates a resolver from the interpreter section of the config.
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            preferred: config.preferred.clone(),
            fallback: config.fallback.clone(),
            search_path: config.search_path.clone(),
        }
    }

    /// Picks the preferred interpreter if it is on the search path, else the
    /// fallback. Never fails.
    pub fn resolve(&self) -> InterpreterChoice {
        if let Some(path) = self.lookup(&self.preferred) {
            tracing::debug!(
                interpreter = %self.preferred,
                path = %path.display(),
                "preferred interpreter found"
            );
            return InterpreterChoice {
                name: self.preferred.clone(),
                kind: InterpreterKind::Preferred,
                program: path,
            };
        }

        tracing::debug!(
            preferred = %self.preferred,
            fallback = %self.fallback,
            "preferred interpreter not found, using fallback"
        );
        let program = self
            .lookup(&self.fallback)
            .unwrap_or_else(|| PathBuf::from(&self.fallback));
        InterpreterChoice {
            name: self.fallback.clone(),
            kind: InterpreterKind::Fallback,
            program,
        }
    }

    /// Look up `name` on the configured search path (or `PATH`).
    fn lookup(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(name, Some(paths), &cwd).ok()
            }
            None => which::which(name).ok(),
        }
    }
}
