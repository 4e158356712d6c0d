//! `weekly-review config` commands

use tracing::debug;

use crate::cli::{ConfigCommands, OutputFormat};
use crate::commands::dispatch::CommandContext;
use weekly_review_core::config::ReviewConfig;
use weekly_review_core::error::{ReviewError, Result};

/// Mask for secrets echoed by `config show`
const REDACTED: &str = "***";

/// Execute a config subcommand
pub fn execute(ctx: &CommandContext, command: &ConfigCommands) -> Result<()> {
    let path = ReviewConfig::config_path()?;
    debug!(
        ?command,
        path = %path.display(),
        overridden = ReviewConfig::is_config_dir_overridden(),
        "config"
    );

    match command {
        ConfigCommands::Path => match ctx.cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => println!("{}", path.display()),
        },

        ConfigCommands::Show => {
            let config = redacted(ReviewConfig::load_from(&path)?);
            match ctx.cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                OutputFormat::Human => print!("{}", config.to_toml()?),
            }
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(ReviewError::already_exists(
                    "config file",
                    path.display(),
                ));
            }
            ReviewConfig::default().save_to(&path)?;

            match ctx.cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({ "path": path.display().to_string() });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Human => {
                    if !ctx.cli.quiet {
                        eprintln!("Wrote default configuration");
                    }
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Copy of the config safe to print: the API key value is masked
fn redacted(mut config: ReviewConfig) -> ReviewConfig {
    if let Some(value) = config.llm.api_key_header_value.as_mut() {
        if !value.is_empty() {
            *value = REDACTED.to_string();
        }
    }
    config
}
