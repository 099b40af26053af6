//! # Process Runner
//!
//! File: lib/src/runner.rs
//!
//! ## Overview
//!
//! This module launches the process described by a [`CommandSpec`], waits for
//! it, and turns what happened into an [`ExecutionResult`] or an
//! [`ExecutionError`].
//!
//! ## Stream Policy
//!
//! | Mode | stdout / stderr | stdin |
//! |---|---|---|
//! | capture (default) | piped into memory | piped from `input`, else inherited |
//! | passthrough (`follow_output`) | inherited from this process | piped from `input`, else inherited |
//!
//! Arguments go straight to `std::process::Command`; no shell is involved.
//!
//! ## Flow
//!
//! 1. Log `Executing command: ...` at the level set on the `CommandSpec`.
//! 2. Spawn. A spawn error becomes `ExecutionError::Start`.
//! 3. Write `input` (if any) from a scoped thread while stdout and stderr are
//!    drained, then wait for exit.
//! 4. Decode captured bytes as UTF-8, replacing invalid sequences.
//! 5. With `check_error_code` on and a non-zero exit, log the captured output
//!    at INFO and return `ExecutionError::NonZeroExit`.
//!
//! The call blocks the current thread until the child exits. Separate calls
//! share nothing, so they can run concurrently from different threads.
//!
use crate::error::{ExecutionError, Result};
use crate::result::ExecutionResult;
use crate::spec::CommandSpec;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Output, Stdio};
use std::thread;
use tracing::{info, warn};

/// Something that can carry out a [`CommandSpec`].
///
/// [`ProcessRunner`] is the real implementation; callers take a
/// `&dyn CommandRunner` so they can be exercised without spawning processes.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult>;
}

/// Runs commands as child processes of the current process. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        execute(spec)
    }
}

/// # Execute a Command (`execute`)
///
/// Launches the process described by `spec` and blocks until it exits.
///
/// ## Arguments
///
/// * `spec` - Program, arguments, working directory, optional stdin input and
///   the check/follow/log-level policy.
///
/// ## Returns
///
/// * `Ok(ExecutionResult)` with the exit code and captured output. Both
///   streams are empty when `follow_output` is set.
///
/// ## Errors
///
/// * [`ExecutionError::Start`] if the process cannot be spawned (missing
///   executable, permissions, bad working directory) or waited on.
/// * [`ExecutionError::NonZeroExit`] if the exit code is non-zero and
///   `check_error_code` is set. The captured output is logged at INFO first.
pub fn execute(spec: &CommandSpec) -> Result<ExecutionResult> {
    spec.get_log_level()
        .log(&format!("Executing command: {}", spec.command_text()));

    let child = build_command(spec)
        .spawn()
        .map_err(|source| start_failure(spec, source))?;

    let output =
        wait_for_output(child, spec.get_input()).map_err(|source| start_failure(spec, source))?;

    let exit_code = exit_code_of(&output.status);
    let (stdout, stderr) = if spec.follows_output() {
        (String::new(), String::new())
    } else {
        (
            decode_output("stdout", output.stdout),
            decode_output("stderr", output.stderr),
        )
    };

    if spec.checks_error_code() && exit_code != 0 {
        log_failed_output(spec.follows_output(), &stdout, &stderr);
        return Err(ExecutionError::NonZeroExit {
            args: spec.argv().to_vec(),
            exit_code,
            stdout,
            stderr,
        });
    }

    Ok(ExecutionResult {
        exit_code,
        stdout,
        stderr,
    })
}

fn build_command(spec: &CommandSpec) -> Command {
    let mut command = Command::new(spec.program());
    command.args(&spec.argv()[1..]);

    if let Some(dir) = spec.get_working_directory() {
        command.current_dir(dir);
    }

    if spec.get_input().is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::inherit());
    }

    if spec.follows_output() {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }
    command
}

/// Waits for `child`, feeding it `input` first when there is any.
///
/// The input is written on a scoped thread so a child that fills its stdout
/// pipe before reading all of stdin cannot deadlock against us.
fn wait_for_output(mut child: Child, input: Option<&str>) -> io::Result<Output> {
    match (child.stdin.take(), input) {
        (Some(stdin), Some(input)) => thread::scope(|scope| {
            scope.spawn(move || write_input(stdin, input));
            child.wait_with_output()
        }),
        _ => child.wait_with_output(),
    }
}

/// Writes `input` and closes stdin by dropping it.
fn write_input(mut stdin: ChildStdin, input: &str) {
    if let Err(err) = stdin.write_all(input.as_bytes()) {
        // A child may exit without reading all of its input.
        if err.kind() != io::ErrorKind::BrokenPipe {
            warn!("Failed to write input to child process: {}", err);
        }
    }
}

/// Exit code, or the negated signal number for a child killed by a signal.
fn exit_code_of(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

fn decode_output(stream: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                "Captured {} is not valid UTF-8 (first invalid byte at offset {}); invalid sequences were replaced.",
                stream,
                err.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn log_failed_output(followed: bool, stdout: &str, stderr: &str) {
    if followed {
        info!("Output of failed command has been redirected to stdout and stderr streams.");
        return;
    }
    if !stdout.is_empty() {
        info!("Stdout of failed command:\n{}", stdout);
    }
    if !stderr.is_empty() {
        info!("Stderr of failed command:\n{}", stderr);
    }
}

fn start_failure(spec: &CommandSpec, source: io::Error) -> ExecutionError {
    ExecutionError::Start {
        args: spec.argv().to_vec(),
        source,
    }
}
