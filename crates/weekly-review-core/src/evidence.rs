//! Evidence packs: the bounded note excerpts handed to the model

use serde::Serialize;

use crate::frontmatter::strip_frontmatter;
use crate::period::to_iso_millis;
use crate::scan::NoteMetadata;

const ELLIPSIS: &str = "...";

/// One note after front matter removal and truncation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceNote {
    pub path: String,
    pub title: String,
    /// Modification instant as ISO-8601 UTC with milliseconds
    pub modified: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidencePack {
    pub notes: Vec<EvidenceNote>,
    pub total_notes_scanned: usize,
    pub notes_included: usize,
}

/// Keep the first `max_notes` notes (input is already newest first) and cut
/// each excerpt down to `max_chars_per_note` characters.
pub fn build_evidence_pack(
    notes: &[NoteMetadata],
    max_notes: usize,
    max_chars_per_note: usize,
) -> EvidencePack {
    let evidence: Vec<EvidenceNote> = notes
        .iter()
        .take(max_notes)
        .map(|note| EvidenceNote {
            path: note.path.clone(),
            title: note.title.clone(),
            modified: to_iso_millis(&note.mtime),
            excerpt: truncate_content(strip_frontmatter(&note.content), max_chars_per_note),
        })
        .collect();

    EvidencePack {
        total_notes_scanned: notes.len(),
        notes_included: evidence.len(),
        notes: evidence,
    }
}

/// Truncate to at most `max_chars` characters, preferring a word boundary.
///
/// Content that fits is returned verbatim. Otherwise the cut lands on the last
/// space at or before `max_chars - 3` (when that space is not the first
/// character), else exactly at `max_chars - 3`, and `"..."` is appended.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    let char_count = content.chars().count();
    if char_count <= max_chars {
        return content.to_string();
    }

    // No room for a single kept character; the marker alone is cut to fit
    if max_chars < ELLIPSIS.len() {
        return ELLIPSIS[..max_chars].to_string();
    }

    let target = max_chars - ELLIPSIS.len();
    let boundaries: Vec<(usize, char)> = content.char_indices().collect();

    let cut = boundaries[..=target]
        .iter()
        .rposition(|(_, c)| *c == ' ')
        .filter(|&pos| pos > 0)
        .unwrap_or(target);

    let byte_end = boundaries[cut].0;
    format!("{}{}", &content[..byte_end], ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn note(path: &str, content: &str) -> NoteMetadata {
        NoteMetadata {
            path: path.to_string(),
            title: path.trim_end_matches(".md").to_string(),
            mtime: DateTime::parse_from_rfc3339("2025-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_limits_to_max_notes() {
        let notes: Vec<_> = (0..5).map(|i| note(&format!("n{i}.md"), "body")).collect();
        let pack = build_evidence_pack(&notes, 3, 100);

        assert_eq!(pack.total_notes_scanned, 5);
        assert_eq!(pack.notes_included, 3);
        assert_eq!(pack.notes.len(), 3);
        assert_eq!(pack.notes[0].path, "n0.md");
    }

    #[test]
    fn test_includes_all_when_under_limit() {
        let notes = vec![note("a.md", "x"), note("b.md", "y")];
        let pack = build_evidence_pack(&notes, 10, 100);
        assert_eq!(pack.notes_included, 2);
        assert_eq!(pack.total_notes_scanned, 2);
    }

    #[test]
    fn test_long_run_without_spaces_is_cut_at_target() {
        let notes = vec![note("a.md", &"A".repeat(100))];
        let pack = build_evidence_pack(&notes, 10, 50);
        let excerpt = &pack.notes[0].excerpt;

        assert!(excerpt.chars().count() <= 50);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt, &format!("{}...", "A".repeat(47)));
    }

    #[test]
    fn test_fitting_content_is_verbatim() {
        let pack = build_evidence_pack(&[note("a.md", "Short note.")], 10, 50);
        assert_eq!(pack.notes[0].excerpt, "Short note.");
    }

    #[test]
    fn test_exact_length_is_not_truncated() {
        let content = "x".repeat(50);
        assert_eq!(truncate_content(&content, 50), content);
    }

    #[test]
    fn test_truncates_at_word_boundary() {
        let content = "The quick brown fox jumps over the lazy dog";
        let excerpt = truncate_content(content, 20);
        assert_eq!(excerpt, "The quick brown...");
        assert!(excerpt.len() <= 20);
    }

    #[test]
    fn test_leading_space_is_not_a_boundary() {
        let content = format!(" {}", "b".repeat(30));
        assert_eq!(truncate_content(&content, 10), format!(" {}...", "b".repeat(6)));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let content = "é".repeat(30);
        let excerpt = truncate_content(&content, 10);
        assert_eq!(excerpt.chars().count(), 10);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_truncation_law_holds_across_lengths() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for max in 0..text.len() + 5 {
            let excerpt = truncate_content(text, max);
            assert!(excerpt.chars().count() <= max, "max={max}");
            if max >= 3 {
                assert_eq!(excerpt.ends_with("..."), text.len() > max, "max={max}");
            }
        }
    }

    #[test]
    fn test_budget_smaller_than_ellipsis() {
        assert_eq!(truncate_content("abcdef", 0), "");
        assert_eq!(truncate_content("abcdef", 1), ".");
        assert_eq!(truncate_content("abcdef", 2), "..");
        assert_eq!(truncate_content("ab", 2), "ab");

        let pack = build_evidence_pack(&[note("a.md", "some longer body")], 5, 2);
        assert!(pack.notes[0].excerpt.chars().count() <= 2);
    }

    #[test]
    fn test_strips_frontmatter_before_measuring() {
        let content = format!("---\ntitle: Long header {}\n---\nBody", "h".repeat(200));
        let pack = build_evidence_pack(&[note("a.md", &content)], 10, 20);
        assert_eq!(pack.notes[0].excerpt, "Body");
    }

    #[test]
    fn test_modified_is_iso_millis() {
        let pack = build_evidence_pack(&[note("a.md", "x")], 10, 20);
        assert_eq!(pack.notes[0].modified, "2025-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_empty_input() {
        let pack = build_evidence_pack(&[], 10, 100);
        assert!(pack.notes.is_empty());
        assert_eq!(pack.total_notes_scanned, 0);
        assert_eq!(pack.notes_included, 0);
    }

    #[test]
    fn test_is_deterministic() {
        let notes = vec![note("a.md", &"word ".repeat(100)), note("b.md", "tiny")];
        assert_eq!(
            build_evidence_pack(&notes, 1, 40),
            build_evidence_pack(&notes, 1, 40)
        );
    }
}
