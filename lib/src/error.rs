//! # Execution Error Types
//!
//! File: lib/src/error.rs
//!
//! ## Overview
//!
//! Every failed execution is reported as exactly one [`ExecutionError`]:
//!
//! - `Start`: launching (or waiting on) the process failed before any exit
//!   code existed. Typical causes are a missing executable, missing execute
//!   permission, or OS resource exhaustion.
//! - `NonZeroExit`: the process ran to completion with a non-zero exit code
//!   and the caller asked for the exit code to be checked.
//!
//! Errors are plain values. They are created once at the point of failure and
//! handed back to the caller, who decides whether to retry, log or abort.
//!
//! ## Display
//!
//! The rendered message of a `NonZeroExit` includes the captured output. Each
//! stream is shown in full up to [`MAX_CHARACTERS_PER_STREAM`] characters;
//! longer streams are cut down to their tail with a note giving the original
//! length. The stored `stdout`/`stderr` values are never truncated.
//!
use std::io;
use thiserror::Error;

/// Number of characters of each stream kept when rendering a `NonZeroExit`.
pub const MAX_CHARACTERS_PER_STREAM: usize = 2000;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ExecutionError>;

/// Failure of a single command execution.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The process could not be launched, or could not be waited on.
    #[error("Command {} could not be started.", format_args_list(.args))]
    Start {
        args: Vec<String>,
        #[source]
        source: io::Error,
    },

    /// The process exited with a non-zero code while enforcement was on.
    #[error("{}", render_non_zero_exit(.args, .exit_code, .stdout, .stderr))]
    NonZeroExit {
        args: Vec<String>,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

impl ExecutionError {
    /// The argument sequence (program first) of the failed command.
    pub fn args(&self) -> &[String] {
        match self {
            ExecutionError::Start { args, .. } | ExecutionError::NonZeroExit { args, .. } => args,
        }
    }

    /// Exit code of the finished process. `None` when it never started.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionError::Start { .. } => None,
            ExecutionError::NonZeroExit { exit_code, .. } => Some(*exit_code),
        }
    }

    /// Captured stdout, untruncated. Empty for `Start` and for passthrough runs.
    pub fn stdout(&self) -> &str {
        match self {
            ExecutionError::Start { .. } => "",
            ExecutionError::NonZeroExit { stdout, .. } => stdout,
        }
    }

    /// Captured stderr, untruncated. Empty for `Start` and for passthrough runs.
    pub fn stderr(&self) -> &str {
        match self {
            ExecutionError::Start { .. } => "",
            ExecutionError::NonZeroExit { stderr, .. } => stderr,
        }
    }

    pub fn is_start_failure(&self) -> bool {
        matches!(self, ExecutionError::Start { .. })
    }
}

/// Returned when a [`CommandSpec`](crate::CommandSpec) is built from an empty
/// argument sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("A command needs at least a program name, got an empty argument list.")]
pub struct EmptyCommandError;

/// Renders arguments as `["prog", "arg"]`.
fn format_args_list(args: &[String]) -> String {
    format!("{:?}", args)
}

fn render_non_zero_exit(args: &[String], exit_code: &i32, stdout: &str, stderr: &str) -> String {
    let mut message = format!(
        "Command {} returned non-zero exit code {}.",
        format_args_list(args),
        exit_code
    );
    message.push_str(&stream_for_display("stdout", stdout, MAX_CHARACTERS_PER_STREAM));
    message.push_str(&stream_for_display("stderr", stderr, MAX_CHARACTERS_PER_STREAM));
    message
}

/// # Render a Captured Stream (`stream_for_display`)
///
/// Formats one captured stream for inclusion in a `NonZeroExit` message.
///
/// ## Arguments
///
/// * `label` - Stream name used in the heading (`"stdout"` or `"stderr"`).
/// * `text` - The full captured text.
/// * `max_characters` - Number of trailing characters kept for long streams.
///
/// ## Returns
///
/// * An empty string when `text` is empty.
/// * `"\n<Label> (starting at next line):\n<text>"` when `text` has at most
///   `max_characters` characters.
/// * Otherwise a heading giving the full character count, followed by the
///   last `max_characters` characters of `text`.
pub(crate) fn stream_for_display(label: &str, text: &str, max_characters: usize) -> String {
    let total = text.chars().count();
    if total == 0 {
        return String::new();
    }
    if total > max_characters {
        // Index of the first kept character, measured in chars, not bytes.
        let start = text
            .char_indices()
            .nth(total - max_characters)
            .map(|(index, _)| index)
            .unwrap_or(0);
        return format!(
            "\nLast {} characters of {} (from {} characters all-in-all) (starting at next line):\n{}",
            max_characters,
            label,
            total,
            &text[start..]
        );
    }
    let mut heading = label.to_string();
    if let Some(first) = heading.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("\n{} (starting at next line):\n{}", heading, text)
}
