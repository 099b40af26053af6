//! # subproc Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the defaults that `subproc run` applies when a flag is
//! not given on the command line. It merges a user-level file with a
//! project-level file, expands `~` in paths, and validates the result.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the `run` handler, not here)
//! 2. Project-specific `.subproc.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. The file named by `SUBPROC_CONFIG`, or else the user-specific
//!    `<config dir>/subproc/config.toml`
//! 4. Built-in defaults (check exit codes, capture output, log at debug)
//!
//! Every field is optional in the files. A field set in the project file wins
//! over the same field in the user file; unset fields fall through.
//!
//! ## Examples
//!
//! ```toml
//! [run]
//! check_error_code = true
//! follow_output = false
//! log_level = "info"
//! working_directory = "~/src/project"
//! ```
//!
use crate::core::error::{CliError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use subproc::LogLevel;
use tracing::{debug, info, warn};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".subproc.toml";

/// Environment variable naming an explicit config file used instead of the
/// user config file.
pub const CONFIG_ENV_VAR: &str = "SUBPROC_CONFIG";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
}

/// Defaults for `subproc run`. `None` means "not configured here".
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Fail when the command exits non-zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_error_code: Option<bool>,
    /// Pass output through to the terminal instead of capturing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_output: Option<bool>,
    /// Level of the "Executing command" log line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Directory to run commands in (can use ~). Will be expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

impl RunConfig {
    pub fn check_error_code(&self) -> bool {
        self.check_error_code.unwrap_or(true)
    }

    pub fn follow_output(&self) -> bool {
        self.follow_output.unwrap_or(false)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    /// Field-wise merge: values from `over` win, missing ones fall back to `self`.
    fn overlay(self, over: RunConfig) -> RunConfig {
        RunConfig {
            check_error_code: over.check_error_code.or(self.check_error_code),
            follow_output: over.follow_output.or(self.follow_output),
            log_level: over.log_level.or(self.log_level),
            working_directory: over.working_directory.or(self.working_directory),
        }
    }
}

impl Config {
    /// Copy with built-in defaults filled in, for display.
    pub fn with_defaults(&self) -> Config {
        Config {
            run: RunConfig {
                check_error_code: Some(self.run.check_error_code()),
                follow_output: Some(self.run.follow_output()),
                log_level: Some(self.run.log_level()),
                working_directory: self.run.working_directory.clone(),
            },
        }
    }
}

/// # Load Configuration (`load_config`)
///
/// Loads the user (or `SUBPROC_CONFIG`) file and the nearest project file,
/// merges them, expands `~` in paths and validates the result.
///
/// ## Returns
///
/// * `Result<Config>` - The merged configuration. Unset fields stay `None`
///   and fall back to built-in defaults through the `RunConfig` getters.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - The current directory cannot be determined.
/// - `SUBPROC_CONFIG` names something that is not a file.
/// - A config file cannot be read or is not valid TOML for `Config`.
/// - The configured working directory exists but is not a directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let base_config = load_base_config()?;
    let project_config = load_project_config(&current_dir)?;
    let mut merged_config = merge_configs(base_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

/// Loads the file named by `SUBPROC_CONFIG`, or the user config file.
fn load_base_config() -> Result<Option<Config>> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(explicit);
        if !path.is_file() {
            return Err(anyhow!(CliError::Config(format!(
                "{} points to '{}', which is not a file.",
                CONFIG_ENV_VAR,
                path.display()
            ))));
        }
        info!("Loading configuration from {}: {}", CONFIG_ENV_VAR, path.display());
        return load_config_from_path(&path).map(Some);
    }
    load_user_config()
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "subproc") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in current directory or ancestors.",
            PROJECT_CONFIG_FILENAME
        );
        Ok(None)
    }
}

/// Walks from `start` upwards looking for `.subproc.toml`, stopping at the
/// first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(base: Config, project: Option<Config>) -> Config {
    match project {
        Some(project_cfg) => Config {
            run: base.run.overlay(project_cfg.run),
        },
        None => base,
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(dir) = config.run.working_directory.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded working directory: {}", dir);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if let Some(dir) = &config.run.working_directory {
        let dir = PathBuf::from(dir);
        if !dir.exists() {
            warn!(
                "Configured working directory '{}' does not exist.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(CliError::Config(format!(
                "Configured working directory '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    Ok(())
}
