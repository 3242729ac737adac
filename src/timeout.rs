//! Timeout policy forwarded to the benchmark program.
//!
//! The launcher never enforces the timeout itself. It only renders the
//! `-t<unit>=<value>` flag understood by `benchmark.py`, where `<unit>` is one
//! of `s`, `m`, `h` or `d` and a value of `0` disables the timeout.

use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};

/// Time unit designator understood by the benchmark program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds.
    #[serde(rename = "s")]
    Seconds,
    /// Minutes.
    #[serde(rename = "m")]
    Minutes,
    /// Hours.
    #[default]
    #[serde(rename = "h")]
    Hours,
    /// Days.
    #[serde(rename = "d")]
    Days,
}

impl TimeUnit {
    /// Single-letter code used on the child's command line.
    pub fn code(self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
        }
    }
}

/// Timeout magnitude paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSpec {
    /// Magnitude in `unit`s. `0` means no timeout.
    pub value: f64,
    /// Unit designator.
    pub unit: TimeUnit,
}

/// Default benchmark timeout magnitude (hours).
pub const DEFAULT_TIMEOUT_VALUE: f64 = 36.0;

impl Default for TimeoutSpec {
    fn default() -> Self {
        Self {
            value: DEFAULT_TIMEOUT_VALUE,
            unit: TimeUnit::Hours,
        }
    }
}

impl TimeoutSpec {
    /// Creates a timeout, rejecting negative or non-finite magnitudes.
    pub fn new(value: f64, unit: TimeUnit) -> Result<Self> {
        let spec = Self { value, unit };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks that the magnitude can be forwarded to the child.
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(LaunchError::InvalidTimeout { value: self.value });
        }
        Ok(())
    }

    /// Renders the child's timeout flag, e.g. `-th=36`.
    pub fn to_flag(&self) -> String {
        format!("-t{}={}", self.unit.code(), self.value)
    }
}
