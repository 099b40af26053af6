//! # subproc Config Command
//!
//! File: cli/src/commands/config.rs
//!
//! Implements `subproc config`, which prints the merged configuration that
//! `subproc run` would start from, as TOML. Built-in defaults are filled in
//! unless `--no-defaults` is given, in which case only values set in a file
//! are shown.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

/// Arguments for the 'config' command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Only show values that come from a configuration file.
    #[arg(long)]
    no_defaults: bool,
}

/// Handler for 'subproc config'.
pub async fn handle_config(args: ConfigArgs) -> Result<()> {
    let cfg = config::load_config()?;
    print!("{}", render_config(&cfg, args.no_defaults)?);
    Ok(())
}

fn render_config(cfg: &Config, no_defaults: bool) -> Result<String> {
    let shown = if no_defaults {
        cfg.clone()
    } else {
        cfg.with_defaults()
    };
    toml::to_string_pretty(&shown).context("Failed to render configuration as TOML")
}
