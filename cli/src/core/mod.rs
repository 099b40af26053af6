//! # subproc CLI Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Shared infrastructure used by the command handlers:
//! - `config`: configuration loading, merging and validation
//! - `error`: the CLI error enum and the `anyhow`-based `Result` alias
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{CliError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
