//! # subproc CLI Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! The CLI reports failures in two layers:
//! - `CliError`: a `thiserror` enum for failures that belong to the CLI itself
//!   (bad configuration, a crashed execution task).
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so handlers can attach
//!   context with `.with_context(...)` and pass library errors through.
//!
//! Errors coming from the library (`subproc::ExecutionError`) are not wrapped.
//! `main` downcasts to them to pick the process exit code.
//!
//! ## Examples
//!
//! ```rust,ignore
//! if dir.is_file() {
//!     return Err(CliError::Config(format!("'{}' is not a directory", dir.display())))?;
//! }
//!
//! match err.downcast_ref::<ExecutionError>() {
//!     Some(ExecutionError::NonZeroExit { exit_code, .. }) => { /* exit with the child's code */ }
//!     _ => { /* exit 1 */ }
//! }
//! ```
//!
use thiserror::Error;

/// Errors raised by the CLI layer.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Execution task failed: {source}")]
    Task {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("Could not write command output: {0}")]
    Output(#[from] std::io::Error),
}

/// Type alias for Result using anyhow::Error, as in every handler.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CliError::Config("Missing setting 'run.log_level'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'run.log_level'"
        );

        let output_err = CliError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert_eq!(
            output_err.to_string(),
            "Could not write command output: pipe closed"
        );
    }

    #[tokio::test]
    async fn test_join_error_converts() {
        let handle: tokio::task::JoinHandle<()> = tokio::spawn(async { panic!("boom") });
        let join_err = handle.await.unwrap_err();
        let err = CliError::from(join_err);
        assert!(err.to_string().starts_with("Execution task failed:"));
    }
}
