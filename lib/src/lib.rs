//! # subproc
//!
//! File: lib/src/lib.rs
//!
//! ## Overview
//!
//! `subproc` runs external commands and normalizes what comes back. A call
//! either returns an [`ExecutionResult`] (exit code plus captured stdout and
//! stderr) or fails with one of the two [`ExecutionError`] kinds:
//!
//! - [`ExecutionError::Start`]: the process could not be launched at all.
//! - [`ExecutionError::NonZeroExit`]: the process ran and exited non-zero while
//!   the caller asked for the exit code to be enforced.
//!
//! ## Architecture
//!
//! - `spec`: [`CommandSpec`], the caller-built description of one invocation.
//! - `runner`: [`ProcessRunner`] and the [`CommandRunner`] seam, which launch
//!   the process and apply the capture/passthrough policy.
//! - `result`: [`ExecutionResult`] and its `trimmed_stdout` accessor.
//! - `error`: [`ExecutionError`] and its display truncation.
//! - `level`: [`LogLevel`], the severity of the pre-execution log line.
//!
//! Logging goes through `tracing`. The library never installs a subscriber;
//! the embedding application decides where log lines end up.
//!
//! ## Examples
//!
//! ```no_run
//! use subproc::CommandSpec;
//!
//! # fn main() -> subproc::Result<()> {
//! let result = CommandSpec::new("git")
//!     .args(["rev-parse", "HEAD"])
//!     .execute()?;
//! println!("HEAD is {}", result.trimmed_stdout());
//! # Ok(())
//! # }
//! ```
//!
pub mod error;
pub mod level;
pub mod result;
pub mod runner;
pub mod spec;

pub use error::{EmptyCommandError, ExecutionError, Result, MAX_CHARACTERS_PER_STREAM};
pub use level::{LogLevel, ParseLogLevelError};
pub use result::ExecutionResult;
pub use runner::{execute, CommandRunner, ProcessRunner};
pub use spec::CommandSpec;
