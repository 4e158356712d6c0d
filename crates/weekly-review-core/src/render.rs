//! Rendering of the final review note

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::period::{week_start_date, ReviewPeriod};

/// Header fields written above the model's reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewNoteMetadata {
    pub week_start: String,
    pub period_start: String,
    pub period_end: String,
    pub period_preset: String,
    pub generated_at: String,
    pub scanned_folders: Vec<String>,
    pub model: String,
}

/// Monday of the week containing `instant` in `tz`, as `YYYY-MM-DD`
pub fn week_start(instant: DateTime<Utc>, tz: Tz) -> String {
    week_start_date(instant, tz).format("%Y-%m-%d").to_string()
}

fn render_header(metadata: &ReviewNoteMetadata) -> String {
    let scanned_folders = if metadata.scanned_folders.is_empty() {
        " []".to_string()
    } else {
        metadata
            .scanned_folders
            .iter()
            .map(|folder| format!("\n  - {folder}"))
            .collect()
    };

    format!(
        "---\n\
         week_start: {}\n\
         period_start: {}\n\
         period_end: {}\n\
         period_preset: {}\n\
         generated_at: {}\n\
         scanned_folders:{}\n\
         model: {}\n\
         ---",
        metadata.week_start,
        metadata.period_start,
        metadata.period_end,
        metadata.period_preset,
        metadata.generated_at,
        scanned_folders,
        metadata.model,
    )
}

/// Header block followed by the verbatim model reply
pub fn render_review_note(
    llm_response: &str,
    period: &ReviewPeriod,
    metadata: &ReviewNoteMetadata,
) -> String {
    debug!(preset = %period.preset, response_chars = llm_response.len(), "render_review_note");
    format!("{}\n{}", render_header(metadata), llm_response)
}
