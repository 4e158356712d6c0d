//! Collision-free review note paths

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{ReviewError, Result};
use crate::period::civil_date;
use crate::vault::normalize_folder;

/// Highest numbered suffix tried before giving up, e.g. `(1000)`
pub const DEFAULT_MAX_FILENAME_ATTEMPTS: u32 = 1000;

/// Resolve the path for a new review note with the default ceiling of 1000.
pub fn resolve_filename(
    output_folder: &str,
    date: DateTime<Utc>,
    existing_files: &[String],
    tz: Tz,
) -> Result<String> {
    resolve_filename_with_limit(
        output_folder,
        date,
        existing_files,
        tz,
        DEFAULT_MAX_FILENAME_ATTEMPTS,
    )
}

/// Resolve `"{folder}/{YYYY-MM-DD} Weekly Review.md"`, or the first free
/// `" (n).md"` variant for n in `2..=max_attempts`.
pub fn resolve_filename_with_limit(
    output_folder: &str,
    date: DateTime<Utc>,
    existing_files: &[String],
    tz: Tz,
    max_attempts: u32,
) -> Result<String> {
    let folder = normalize_folder(output_folder);
    let base_name = format!("{} Weekly Review", civil_date(date, tz).format("%Y-%m-%d"));
    let existing: HashSet<&str> = existing_files.iter().map(String::as_str).collect();

    let path_for = |name: &str| {
        if folder.is_empty() {
            format!("{name}.md")
        } else {
            format!("{folder}/{name}.md")
        }
    };

    let base_path = path_for(&base_name);
    if !existing.contains(base_path.as_str()) {
        return Ok(base_path);
    }

    (2..=max_attempts)
        .map(|n| path_for(&format!("{base_name} ({n})")))
        .find(|candidate| !existing.contains(candidate.as_str()))
        .ok_or(ReviewError::Exhausted {
            attempts: max_attempts,
        })
}
