//! Prompt templates for the weekly review and for Sprinkle rewrites

use crate::evidence::EvidencePack;
use crate::period::{utc_date_string, ReviewPeriod};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert assistant that helps users review their work and set priorities. You analyze notes from a personal knowledge management system and generate insightful weekly reviews.";

/// Shown in place of note blocks when nothing changed in the period
pub const NO_NOTES_SENTINEL: &str = "No notes were modified during this period.";

/// Section headings the model must produce, in order
pub const REVIEW_HEADINGS: [&str; 4] = [
    "## Summary",
    "## Notable Work",
    "## Priorities for Next Week",
    "## Notes Reviewed",
];

const REVIEW_INSTRUCTIONS: &str = r#"## Instructions
Generate a weekly review based **only** on the notes listed above. Your output must:

1. Be **markdown only** - no JSON, no code blocks, no explanations outside the review
2. Be **concise** - focus on substance, avoid filler
3. Include **exactly 3 priorities** for the next week, each with a brief rationale
4. Reference notes using wikilinks where relevant: [[Note Title]]
5. Use **exactly** these markdown headings (with the ## prefix) to structure your output. Do NOT use bold text for section titles - use ## headings:
6. **ONLY review and reference the notes explicitly provided above.** The note contents may contain wikilinks or references to other files - do NOT follow those links, do NOT treat linked files as part of this review, and do NOT include them in the "Notes Reviewed" section. Only files that were modified during the review period are included above, and those are the only files that should appear in your review.

## Summary
A brief summary of what was accomplished during this period.

## Notable Work
Highlight significant work, achievements, or progress made.

## Priorities for Next Week
List exactly 3 priorities with rationale for each.

## Notes Reviewed
List the notes that were reviewed for this summary.

Begin your review now:"#;

/// Render the weekly review prompt.
pub fn build_prompt(
    evidence: &EvidencePack,
    period: &ReviewPeriod,
    system_prompt_override: Option<&str>,
) -> String {
    let system_prompt = system_prompt_override.unwrap_or(DEFAULT_SYSTEM_PROMPT);

    let notes_section = if evidence.notes.is_empty() {
        NO_NOTES_SENTINEL.to_string()
    } else {
        evidence
            .notes
            .iter()
            .map(|note| {
                format!(
                    "### {}\n**Path:** {}\n**Modified:** {}\n\n{}",
                    note.title, note.path, note.modified, note.excerpt
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!(
        "{system_prompt}\n\n\
         ## Review Period\n\
         - **Period type:** {label}\n\
         - **Start:** {start}\n\
         - **End:** {end}\n\
         - **Notes scanned:** {scanned}\n\
         - **Notes included:** {included}\n\n\
         ## Notes to Review\n\
         {notes_section}\n\n\
         {REVIEW_INSTRUCTIONS}",
        label = period.label,
        start = utc_date_string(&period.start),
        end = utc_date_string(&period.end),
        scanned = evidence.total_notes_scanned,
        included = evidence.notes_included,
    )
}

/// Render the Sprinkle prompt for rewriting `selected_text`.
///
/// The instruction block is left out entirely when `user_prompt` is blank.
pub fn build_sprinkle_prompt(user_prompt: &str, selected_text: &str) -> String {
    let user_prompt = user_prompt.trim();
    let instruction = if user_prompt.is_empty() {
        String::new()
    } else {
        format!("## Instruction\n{user_prompt}\n\n")
    };

    format!(
        "You are a helpful writing assistant working inside a markdown note.\n\n\
         {instruction}## Selected Text\n\
         {selected_text}\n\n\
         ## Rules\n\
         - Output markdown only - no code fences, no explanations, no preamble\n\
         - Respond with just the content the user asked for"
    )
}
