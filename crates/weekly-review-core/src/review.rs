//! The weekly review pipeline
//!
//! period -> scan -> evidence -> prompt -> chat -> render -> filename -> write.
//! Nothing touches the vault until the model has replied and the note is
//! fully rendered, so a failure at any stage leaves no partial output.

use std::time::Instant;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ReviewConfig;
use crate::error::Result;
use crate::evidence::{build_evidence_pack, EvidencePack};
use crate::filenames::resolve_filename_with_limit;
use crate::llm::{call_llm, HttpTransport};
use crate::period::{resolve_period, to_iso_millis, CustomRange, PeriodPreset, ReviewPeriod};
use crate::prompt::build_prompt;
use crate::render::{render_review_note, week_start, ReviewNoteMetadata};
use crate::scan::scan_notes;
use crate::trace_time;
use crate::vault::VaultStorage;

/// Per-invocation choices layered over the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Falls back to `review.default_preset`
    pub preset: Option<PeriodPreset>,
    pub custom_range: Option<CustomRange>,
    /// Falls back to `review.scan_folders`
    pub folders: Option<Vec<String>>,
    /// Falls back to `review.output_folder`
    pub output_folder: Option<String>,
}

/// Everything computed before the model is called
#[derive(Debug, Clone)]
pub struct PreparedReview {
    pub period: ReviewPeriod,
    pub folders: Vec<String>,
    pub evidence: EvidencePack,
    pub prompt: String,
    pub timezone: Tz,
}

/// A review that has been written to the vault
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub path: String,
    #[serde(skip)]
    pub content: String,
    pub period: ReviewPeriod,
    pub notes_scanned: usize,
    pub notes_included: usize,
}

/// Resolve the period, scan the vault and build the prompt without calling
/// the model.
pub fn prepare_review(
    storage: &dyn VaultStorage,
    config: &ReviewConfig,
    request: &ReviewRequest,
    now: DateTime<Utc>,
) -> Result<PreparedReview> {
    let started = Instant::now();
    let timezone = config.timezone()?;
    let preset = request.preset.unwrap_or(config.review.default_preset);
    let period = resolve_period(preset, request.custom_range, now, timezone)?;

    let folders = request
        .folders
        .clone()
        .unwrap_or_else(|| config.review.scan_folders.clone());

    let notes = scan_notes(storage, &folders, period.start, period.end)?;
    let evidence = build_evidence_pack(
        &notes,
        config.review.max_notes,
        config.review.max_chars_per_note,
    );
    let prompt = build_prompt(&evidence, &period, config.review.system_prompt.as_deref());

    debug!(
        preset = %period.preset,
        start = %to_iso_millis(&period.start),
        end = %to_iso_millis(&period.end),
        scanned = evidence.total_notes_scanned,
        included = evidence.notes_included,
        "prepared review"
    );
    trace_time!(started, "prepare_review");

    Ok(PreparedReview {
        period,
        folders,
        evidence,
        prompt,
        timezone,
    })
}

/// Run the whole pipeline and write the review note into the vault.
pub fn generate_review(
    storage: &dyn VaultStorage,
    transport: &dyn HttpTransport,
    config: &ReviewConfig,
    request: &ReviewRequest,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome> {
    let prepared = prepare_review(storage, config, request, now)?;
    let response = call_llm(&config.llm, transport, &prepared.prompt)?;

    let metadata = ReviewNoteMetadata {
        week_start: week_start(now, prepared.timezone),
        period_start: to_iso_millis(&prepared.period.start),
        period_end: to_iso_millis(&prepared.period.end),
        period_preset: prepared.period.preset.to_string(),
        generated_at: to_iso_millis(&now),
        scanned_folders: prepared.folders.clone(),
        model: config.llm.model.clone(),
    };
    let content = render_review_note(&response, &prepared.period, &metadata);

    let output_folder = request
        .output_folder
        .as_deref()
        .unwrap_or(&config.review.output_folder);
    let existing = storage.list_files_in_folder(output_folder)?;
    let path = resolve_filename_with_limit(
        output_folder,
        now,
        &existing,
        prepared.timezone,
        config.review.max_filename_attempts,
    )?;

    storage.create_file(&path, &content)?;
    info!(path = %path, "weekly review written");

    Ok(ReviewOutcome {
        path,
        content,
        period: prepared.period,
        notes_scanned: prepared.evidence.total_notes_scanned,
        notes_included: prepared.evidence.notes_included,
    })
}
