//! # subproc CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test file
//! declares `mod common;` and builds its commands through these functions so
//! runs are isolated from the developer's own configuration files.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// File name of the stand-in user config inside a sandbox.
pub const USER_CONFIG: &str = "user-config.toml";

/// # Get subproc Command (`subproc_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `subproc` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn subproc_cmd() -> Command {
    Command::cargo_bin("subproc").expect("Failed to find subproc binary for testing")
}

/// # Create a Sandbox (`sandbox`)
///
/// Creates a temporary directory holding an empty stand-in user config.
pub fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create sandbox directory");
    fs::write(dir.path().join(USER_CONFIG), "").expect("Failed to write sandbox user config");
    dir
}

/// # Get an Isolated Command (`isolated_cmd`)
///
/// Runs `subproc` inside `dir` with `SUBPROC_CONFIG` pointing at the sandbox's
/// user config, no `RUST_LOG` override, and colors disabled.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = subproc_cmd();
    cmd.current_dir(dir)
        .env("SUBPROC_CONFIG", dir.join(USER_CONFIG))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes a project `.subproc.toml` into `dir`.
pub fn write_project_config(dir: &Path, content: &str) {
    fs::write(dir.join(".subproc.toml"), content).expect("Failed to write project config");
}
