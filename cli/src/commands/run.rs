//! # subproc Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `subproc run`, which executes a program through the `subproc`
//! library and mirrors its outcome:
//!
//! - captured stdout/stderr are written to this process's stdout/stderr
//!   (`--trim` drops one trailing newline from stdout);
//! - the handler returns the child's exit code, which `main` exits with;
//! - launch failures and enforced non-zero exits come back as
//!   `subproc::ExecutionError`, and `main` turns them into exit codes.
//!
//! ## Architecture
//!
//! 1. Load configuration (`core::config`).
//! 2. Build a `CommandSpec` from flags, falling back to configured defaults.
//! 3. Run it on the blocking pool (`tokio::task::spawn_blocking`), since the
//!    library call blocks until the child exits.
//! 4. Print captured output and return the exit code.
//!
//! ## Examples
//!
//! ```bash
//! # Print the current commit without the trailing newline
//! subproc run --trim git rev-parse HEAD
//!
//! # Run tests with output streaming to the terminal, tolerate failure
//! subproc run --follow --no-check -C ~/src/app cargo test
//!
//! # Feed stdin
//! subproc run --input "b\na\n" sort
//! ```
//!
use crate::core::config::{self, RunConfig};
use crate::core::error::{CliError, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use subproc::{CommandRunner, CommandSpec, ExecutionResult, LogLevel, ProcessRunner};
use tracing::debug;

/// Arguments for the 'run' command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Fail when the command exits non-zero (default, unless configured otherwise).
    #[arg(long, overrides_with = "no_check")]
    check: bool,

    /// Tolerate a non-zero exit code; it is still used as subproc's own exit code.
    #[arg(long, overrides_with = "check")]
    no_check: bool,

    /// Let the command write directly to this terminal instead of capturing its output.
    #[arg(short, long, overrides_with = "capture")]
    follow: bool,

    /// Capture the command's output and print it after it exits (default).
    #[arg(long, overrides_with = "follow")]
    capture: bool,

    /// Directory to run the command in (can use ~).
    #[arg(short = 'C', long, value_name = "DIR")]
    cwd: Option<String>,

    /// Level of the "Executing command" log line (trace, debug, info, warn, error).
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Text to feed to the command's standard input.
    #[arg(short, long, value_name = "TEXT")]
    input: Option<String>,

    /// Remove one trailing newline from the printed stdout.
    #[arg(short, long)]
    trim: bool,

    /// The program to run followed by its arguments.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

/// # Handle Run Command (`handle_run`)
///
/// Loads configuration, runs the requested command and prints its output.
///
/// ## Arguments
///
/// * `args` - The parsed `RunArgs`.
///
/// ## Returns
///
/// * `Result<i32>` - The command's exit code, which `main` uses as its own.
/// * `Err` - Configuration errors, output errors, or the library's
///   `ExecutionError`, passed through unchanged so `main` can map it.
pub async fn handle_run(args: RunArgs) -> Result<i32> {
    let cfg = config::load_config()?;
    run_with(args, &cfg.run, Arc::new(ProcessRunner)).await
}

/// Runs the command described by `args` on `runner` and prints its output.
async fn run_with(
    args: RunArgs,
    defaults: &RunConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<i32> {
    let spec = build_spec(&args, defaults)?;
    debug!("Built command spec: {:?}", spec);

    let result = tokio::task::spawn_blocking(move || runner.run(&spec))
        .await
        .map_err(CliError::from)??;

    print_result(&result, args.trim)?;
    Ok(result.exit_code)
}

/// Combines flags with configured defaults. Flags always win.
fn build_spec(args: &RunArgs, defaults: &RunConfig) -> Result<CommandSpec> {
    let check_error_code = if args.no_check {
        false
    } else if args.check {
        true
    } else {
        defaults.check_error_code()
    };
    let follow_output = if args.follow {
        true
    } else if args.capture {
        false
    } else {
        defaults.follow_output()
    };

    let mut spec = CommandSpec::from_args(args.command.iter().cloned())?
        .check_error_code(check_error_code)
        .follow_output(follow_output)
        .log_level(args.log_level.unwrap_or_else(|| defaults.log_level()));

    // Configured paths are expanded at load time; the flag is expanded here.
    let working_directory = args
        .cwd
        .as_deref()
        .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
        .or_else(|| defaults.working_directory.as_ref().map(PathBuf::from));
    if let Some(dir) = working_directory {
        spec = spec.working_directory(dir);
    }
    if let Some(input) = &args.input {
        spec = spec.input(input.as_str());
    }
    Ok(spec)
}

fn print_result(result: &ExecutionResult, trim: bool) -> Result<()> {
    let stdout_text = if trim {
        result.trimmed_stdout()
    } else {
        result.stdout.as_str()
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(stdout_text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(CliError::from)?;

    let mut stderr = std::io::stderr().lock();
    stderr
        .write_all(result.stderr.as_bytes())
        .and_then(|_| stderr.flush())
        .map_err(CliError::from)?;
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;
    use subproc::ExecutionError;

    /// Records every spec it is given and answers with a fixed exit code.
    struct FakeRunner {
        exit_code: i32,
        seen: Mutex<Vec<CommandSpec>>,
    }

    impl FakeRunner {
        fn new(exit_code: i32) -> Arc<Self> {
            Arc::new(Self {
                exit_code,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, spec: &CommandSpec) -> subproc::Result<ExecutionResult> {
            self.seen.lock().unwrap().push(spec.clone());
            if self.exit_code != 0 && spec.checks_error_code() {
                return Err(ExecutionError::NonZeroExit {
                    args: spec.argv().to_vec(),
                    exit_code: self.exit_code,
                    stdout: String::new(),
                    stderr: "fake failure\n".into(),
                });
            }
            Ok(ExecutionResult::new(self.exit_code, "", ""))
        }
    }

    fn parse(args: &[&str]) -> RunArgs {
        let mut full = vec!["run"];
        full.extend_from_slice(args);
        RunArgs::try_parse_from(full).expect("arguments should parse")
    }

    #[test]
    fn test_run_args_parsing() {
        let args = parse(&["-t", "--no-check", "git", "log", "--oneline", "-n", "3"]);
        assert!(args.trim);
        assert!(args.no_check);
        assert_eq!(args.command, ["git", "log", "--oneline", "-n", "3"]);
    }

    #[test]
    fn test_run_args_require_a_command() {
        assert!(RunArgs::try_parse_from(["run"]).is_err());
        assert!(RunArgs::try_parse_from(["run", "--follow"]).is_err());
    }

    #[test]
    fn test_run_args_reject_unknown_log_level() {
        assert!(RunArgs::try_parse_from(["run", "--log-level", "loud", "ls"]).is_err());
    }

    #[test]
    fn test_build_spec_uses_builtin_defaults() {
        let spec = build_spec(&parse(&["ls", "-la"]), &RunConfig::default()).unwrap();
        assert_eq!(spec.argv(), ["ls", "-la"]);
        assert!(spec.checks_error_code());
        assert!(!spec.follows_output());
        assert_eq!(spec.get_log_level(), LogLevel::Debug);
        assert_eq!(spec.get_working_directory(), None);
        assert_eq!(spec.get_input(), None);
    }

    #[test]
    fn test_build_spec_uses_configured_defaults() {
        let defaults = RunConfig {
            check_error_code: Some(false),
            follow_output: Some(true),
            log_level: Some(LogLevel::Info),
            working_directory: Some("/srv/app".into()),
        };
        let spec = build_spec(&parse(&["make"]), &defaults).unwrap();
        assert!(!spec.checks_error_code());
        assert!(spec.follows_output());
        assert_eq!(spec.get_log_level(), LogLevel::Info);
        assert_eq!(spec.get_working_directory(), Some(Path::new("/srv/app")));
    }

    #[test]
    fn test_build_spec_flags_override_config() {
        let defaults = RunConfig {
            check_error_code: Some(false),
            follow_output: Some(true),
            log_level: Some(LogLevel::Info),
            working_directory: Some("/srv/app".into()),
        };
        let args = parse(&[
            "--check",
            "--capture",
            "-l",
            "warning",
            "-C",
            "/tmp",
            "-i",
            "data",
            "cat",
        ]);
        let spec = build_spec(&args, &defaults).unwrap();
        assert!(spec.checks_error_code());
        assert!(!spec.follows_output());
        assert_eq!(spec.get_log_level(), LogLevel::Warn);
        assert_eq!(spec.get_working_directory(), Some(Path::new("/tmp")));
        assert_eq!(spec.get_input(), Some("data"));
    }

    #[test]
    fn test_build_spec_expands_tilde_in_cwd_flag() {
        let home = dirs::home_dir().expect("home directory should be known");
        let spec = build_spec(&parse(&["--cwd=~/work", "pwd"]), &RunConfig::default()).unwrap();
        assert_eq!(spec.get_working_directory(), Some(home.join("work").as_path()));
    }

    #[tokio::test]
    async fn test_run_with_returns_exit_code_when_unchecked() {
        let fake = FakeRunner::new(4);
        let code = run_with(parse(&["--no-check", "flaky"]), &RunConfig::default(), fake.clone())
            .await
            .unwrap();
        assert_eq!(code, 4);
        let seen = fake.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].argv(), ["flaky"]);
    }

    #[tokio::test]
    async fn test_run_with_propagates_non_zero_exit() {
        let fake = FakeRunner::new(2);
        let err = run_with(parse(&["broken"]), &RunConfig::default(), fake)
            .await
            .unwrap_err();
        let exec_err = err
            .downcast_ref::<ExecutionError>()
            .expect("library error should pass through unwrapped");
        assert_eq!(exec_err.exit_code(), Some(2));
        assert_eq!(exec_err.stderr(), "fake failure\n");
    }

    #[tokio::test]
    async fn test_run_with_success() {
        let fake = FakeRunner::new(0);
        let code = run_with(parse(&["true"]), &RunConfig::default(), fake)
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
