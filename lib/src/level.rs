//! # Log Levels
//!
//! File: lib/src/level.rs
//!
//! Severity used for the "Executing command" line emitted before each launch.
//! `tracing` only accepts a level known at compile time in its macros, so
//! [`LogLevel::log`] dispatches onto the matching macro.
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of the pre-execution log line. Defaults to `Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

/// Returned when a string names no known level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level '{0}'. Expected one of: trace, debug, info, warn, error.")]
pub struct ParseLogLevelError(pub String);

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Emits `message` at this level under the `subproc::runner` target.
    pub(crate) fn log(&self, message: &str) {
        match self {
            LogLevel::Trace => tracing::trace!(target: "subproc::runner", "{}", message),
            LogLevel::Debug => tracing::debug!(target: "subproc::runner", "{}", message),
            LogLevel::Info => tracing::info!(target: "subproc::runner", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "subproc::runner", "{}", message),
            LogLevel::Error => tracing::error!(target: "subproc::runner", "{}", message),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    /// Case-insensitive. `warning`, `critical` and `fatal` are accepted as
    /// aliases so level names from other logging systems keep working.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" | "fatal" => Ok(LogLevel::Error),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ParseLogLevelError;

    fn try_from(value: String) -> Result<Self, ParseLogLevelError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
