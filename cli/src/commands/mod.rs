//! # subproc Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Each top-level `subproc` command lives in its own module with an argument
//! struct (`clap` derive) and an async handler:
//!
//! - `run`: execute a program through the `subproc` library
//! - `config`: print the effective configuration
//!

/// Executes a program with capture/passthrough and exit code policies.
pub mod run;
/// Shows the merged configuration that `run` would use.
pub mod config;
