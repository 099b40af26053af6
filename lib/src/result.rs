//! # Execution Results
//!
//! File: lib/src/result.rs
//!
//! [`ExecutionResult`] is what a finished command hands back when it either
//! succeeded or the caller tolerated a non-zero exit code.
//!

/// Exit code and captured output of one finished process.
///
/// In passthrough mode the child wrote straight to the inherited streams, so
/// `stdout` and `stderr` are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// `true` when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout with one trailing `\n` removed, if there is one.
    ///
    /// Programs end their last line of output with a newline that is not part
    /// of the value they print (think `git rev-parse HEAD`). Only a single
    /// newline is stripped; `"a\n\n"` becomes `"a\n"`.
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.strip_suffix('\n').unwrap_or(&self.stdout)
    }
}
