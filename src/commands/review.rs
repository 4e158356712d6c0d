//! `weekly-review review` command
//!
//! - `--preset` picks the period (default from config)
//! - `--start`/`--end` give the window for the `custom` preset
//! - `--folder` (repeatable) and `--output-folder` override the config
//! - `--dry-run` prints the prompt without calling the model
//!
//! Example usage:
//! - `weekly-review review --preset last_7_days --folder projects`
//! - `weekly-review review --preset custom --start 2025-01-01 --end 2025-01-07`

use chrono::Utc;
use tracing::{debug, info};

use crate::cli::{OutputFormat, ReviewArgs};
use crate::commands::dispatch::CommandContext;
use weekly_review_core::config::ReviewConfig;
use weekly_review_core::error::Result;
use weekly_review_core::llm::UreqTransport;
use weekly_review_core::period::PeriodChoice;
use weekly_review_core::review::{generate_review, prepare_review, ReviewRequest};

/// Execute the review command
pub fn execute(ctx: &CommandContext, args: &ReviewArgs) -> Result<()> {
    let stored = ctx.load_config()?;
    let config = apply_overrides(stored.clone(), args)?;
    let timezone = config.timezone()?;

    let choice = PeriodChoice::from_inputs(
        args.preset.unwrap_or(config.review.default_preset),
        args.start.as_deref(),
        args.end.as_deref(),
        timezone,
        args.save_default,
    )?;
    debug!(?choice, "period_choice");

    let vault = ctx.open_vault()?;

    if choice.save_as_default {
        let mut stored = stored;
        stored.set_default_preset(choice.preset);
        stored.save()?;
        info!(preset = %choice.preset, "saved default preset");
    }

    let request = ReviewRequest {
        preset: Some(choice.preset),
        custom_range: choice.custom_range,
        folders: (!args.folder.is_empty()).then(|| args.folder.clone()),
        output_folder: args.output_folder.clone(),
    };
    let now = Utc::now();

    if args.dry_run {
        let prepared = prepare_review(&vault, &config, &request, now)?;
        match ctx.cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "period": prepared.period,
                    "folders": prepared.folders,
                    "notes_scanned": prepared.evidence.total_notes_scanned,
                    "notes_included": prepared.evidence.notes_included,
                    "prompt": prepared.prompt,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => println!("{}", prepared.prompt),
        }
        return Ok(());
    }

    let transport = UreqTransport::new();
    let outcome = generate_review(&vault, &transport, &config, &request, now)?;
    debug!(elapsed = ?ctx.start.elapsed(), "generate_review");

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": outcome.path,
                "period": outcome.period,
                "notes_scanned": outcome.notes_scanned,
                "notes_included": outcome.notes_included,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                eprintln!(
                    "Reviewed {} of {} notes ({})",
                    outcome.notes_included, outcome.notes_scanned, outcome.period.label
                );
            }
            println!("{}", outcome.path);
        }
    }

    Ok(())
}

/// Layer per-run flags over the loaded configuration
fn apply_overrides(mut config: ReviewConfig, args: &ReviewArgs) -> Result<ReviewConfig> {
    if let Some(timezone) = &args.timezone {
        config.review.timezone = timezone.clone();
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    config.validate()?;
    Ok(config)
}
