//! Command-line argument parsing for lined.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for applying them to the configuration.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use lined::config::{Config, ConfigValue};

/// Command-line interface configuration.
#[derive(Parser, Debug, Default)]
#[command(name = "lined", version, about = "An EDLIN-style line editor")]
pub struct Cli {
    /// File to edit
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum number of lines the buffer may hold
    #[arg(long, value_name = "N")]
    pub max_lines: Option<u32>,

    /// Command prompt text
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Do not print the startup banner
    #[arg(long)]
    pub no_banner: bool,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(max_lines) = self.max_lines {
            config.set("max-lines", ConfigValue::Int(i64::from(max_lines)));
        }
        if let Some(prompt) = &self.prompt {
            config.set("prompt", ConfigValue::String(prompt.clone()));
        }
        if self.no_banner {
            config.set("banner", false);
        }
    }

    /// Log level for the `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
