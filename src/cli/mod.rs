//! CLI argument parsing for weekly-review
//!
//! Global flags: --vault, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod output;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{ReviewArgs, SprinkleArgs};
pub use output::OutputFormat;

/// weekly-review - LLM-written weekly reviews for a markdown vault
#[derive(Parser, Debug)]
#[command(name = "weekly-review")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault root directory (defaults to the current directory)
    #[arg(long, global = true, env = "WEEKLY_REVIEW_VAULT")]
    pub vault: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `trace`, `weekly_review_core=debug`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a weekly review note from recently modified notes
    Review(ReviewArgs),

    /// Rewrite a piece of text with the chat model
    Sprinkle(SprinkleArgs),

    /// Inspect or initialize the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
