//! # Command Specifications
//!
//! File: lib/src/spec.rs
//!
//! ## Overview
//!
//! A [`CommandSpec`] describes one invocation: the program and its arguments,
//! where to run it, what to feed its stdin, and the policy flags that decide
//! how its output and exit code are handled.
//!
//! The argument sequence is never empty. `CommandSpec::new` takes the program
//! up front; `from_args` and `TryFrom<Vec<String>>` reject an empty sequence
//! with [`EmptyCommandError`].
//!
//! ## Examples
//!
//! ```no_run
//! use subproc::{CommandSpec, LogLevel};
//!
//! # fn main() -> subproc::Result<()> {
//! let result = CommandSpec::new("cargo")
//!     .args(["fmt", "--check"])
//!     .working_directory("/tmp/project")
//!     .check_error_code(false)
//!     .log_level(LogLevel::Info)
//!     .execute()?;
//! if !result.success() {
//!     eprintln!("formatting needed:\n{}", result.stdout);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::error::{EmptyCommandError, Result};
use crate::level::LogLevel;
use crate::result::ExecutionResult;
use crate::runner;
use std::path::{Path, PathBuf};

/// Description of a single command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    args: Vec<String>,
    working_directory: Option<PathBuf>,
    input: Option<String>,
    check_error_code: bool,
    follow_output: bool,
    log_level: LogLevel,
}

impl CommandSpec {
    /// Starts a spec for `program` with the default policy: exit code checked,
    /// output captured, stdin inherited, logged at `Debug`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            args: vec![program.into()],
            working_directory: None,
            input: None,
            check_error_code: true,
            follow_output: false,
            log_level: LogLevel::default(),
        }
    }

    /// # Build From an Argument Sequence (`from_args`)
    ///
    /// Builds a spec from a full argument sequence, program first. All other
    /// settings start at their defaults.
    ///
    /// ## Arguments
    ///
    /// * `args` - The program followed by its arguments, passed to the child
    ///   verbatim.
    ///
    /// ## Errors
    ///
    /// Returns [`EmptyCommandError`] if `args` yields nothing.
    pub fn from_args<I, S>(args: I) -> std::result::Result<Self, EmptyCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().ok_or(EmptyCommandError)?;
        Ok(Self::new(program).args(args))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the process in `dir` instead of the caller's current directory.
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Feeds `input` to the child's stdin, which is then closed.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Whether a non-zero exit code fails the call (default `true`).
    pub fn check_error_code(mut self, check: bool) -> Self {
        self.check_error_code = check;
        self
    }

    /// Whether the child writes straight to the inherited stdout/stderr
    /// instead of being captured (default `false`).
    pub fn follow_output(mut self, follow: bool) -> Self {
        self.follow_output = follow;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Shorthand for [`runner::execute`].
    pub fn execute(&self) -> Result<ExecutionResult> {
        runner::execute(self)
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// Full argument sequence, program first.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub fn get_working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    pub fn get_input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn checks_error_code(&self) -> bool {
        self.check_error_code
    }

    pub fn follows_output(&self) -> bool {
        self.follow_output
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Text used by the pre-execution log line:
    /// `program "arg1" "arg2" in /some/dir`.
    pub fn command_text(&self) -> String {
        let mut text = self.program().to_string();
        for arg in &self.args[1..] {
            text.push_str(" \"");
            text.push_str(arg);
            text.push('"');
        }
        if let Some(dir) = &self.working_directory {
            text.push_str(" in ");
            text.push_str(&dir.display().to_string());
        }
        text
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = EmptyCommandError;

    fn try_from(args: Vec<String>) -> std::result::Result<Self, Self::Error> {
        Self::from_args(args)
    }
}
