//! Argument structs for the larger subcommands

use clap::Args;
use std::path::PathBuf;

use super::parse::parse_preset;
use weekly_review_core::period::PeriodPreset;

/// Arguments for `weekly-review review`
#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    /// Period preset: current_week, current_month, last_7_days, last_30_days, custom
    #[arg(long, short, value_parser = parse_preset)]
    pub preset: Option<PeriodPreset>,

    /// Custom range start (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// Custom range end, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,

    /// Only scan notes under this folder (repeatable)
    #[arg(long, short)]
    pub folder: Vec<String>,

    /// Folder the review note is written to
    #[arg(long, short)]
    pub output_folder: Option<String>,

    /// IANA timezone for calendar presets and filenames
    #[arg(long)]
    pub timezone: Option<String>,

    /// Chat model name
    #[arg(long, short)]
    pub model: Option<String>,

    /// Print the prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Remember the chosen preset as the default
    #[arg(long)]
    pub save_default: bool,
}

/// Arguments for `weekly-review sprinkle`
#[derive(Args, Debug, Clone)]
pub struct SprinkleArgs {
    /// What to do with the text
    #[arg(long, short, default_value = "")]
    pub prompt: String,

    /// Text to rewrite
    #[arg(long, short, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text to rewrite from a file
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Accept the first reply without asking
    #[arg(long, short)]
    pub yes: bool,

    /// Chat model name
    #[arg(long, short)]
    pub model: Option<String>,
}
