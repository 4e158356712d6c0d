//! Output format selection

use clap::ValueEnum;

/// How command results are printed on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for people
    #[default]
    Human,
    /// A single JSON document
    Json,
}
