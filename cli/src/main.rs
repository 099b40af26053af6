//! # subproc Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `subproc` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//! - Mapping failures to process exit codes
//!
//! ## Exit Codes
//!
//! | Outcome | Exit code |
//! |---|---|
//! | `run` finished | the command's own exit code (128+N if killed by signal N) |
//! | `run` exited non-zero with checking on | the command's exit code |
//! | the command could not be started | 127 |
//! | any other error | 1 |
//!
//! ## Examples
//!
//! ```bash
//! subproc --help
//! subproc -vv run echo hello    # shows the "Executing command" debug line
//! subproc config
//! ```
//!
use clap::Parser;
use subproc::ExecutionError;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handles specific command logic (run, config)
mod core; // Core infrastructure (errors, config)

/// Exit code used when the command could not be started.
const EXIT_START_FAILURE: i32 = 127;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "subproc",
    about = "Run a command with captured or passthrough output and typed failures",
    long_about = "Run external commands through the subproc library.\n\
                  Output is captured and printed after exit, or passed straight through;\n\
                  non-zero exit codes fail the run unless --no-check is given.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Execute a program
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    /// Print the effective configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Config(args) => commands::config::handle_config(args).await.map(|_| 0),
    };

    match command_result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(shell_exit_code(code)),
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code_for_error(&e));
        }
    }
}

/// Maps a child exit code to one a shell reports: signals become 128+N.
fn shell_exit_code(code: i32) -> i32 {
    if code < 0 {
        128 - code
    } else {
        code
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ExecutionError>() {
        Some(ExecutionError::NonZeroExit { exit_code, .. }) => shell_exit_code(*exit_code),
        Some(ExecutionError::Start { .. }) => EXIT_START_FAILURE,
        None => 1,
    }
}
