//! Vault scanning: folder + time-window filtering, newest first

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::frontmatter::extract_title;
use crate::trace_time;
use crate::vault::{is_in_folder, normalize_folder, VaultStorage};

/// One scanned document before truncation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub path: String,
    pub title: String,
    pub mtime: DateTime<Utc>,
    pub content: String,
}

/// Collect the notes in `folders` (all notes when empty) whose modification
/// time falls in `[start, end]`, newest first, with content and titles loaded.
#[tracing::instrument(skip(storage))]
pub fn scan_notes(
    storage: &dyn VaultStorage,
    folders: &[String],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<NoteMetadata>> {
    let started = Instant::now();
    let folders: Vec<&str> = folders.iter().map(|f| normalize_folder(f)).collect();

    let mut files = storage.list_markdown_files()?;
    let listed = files.len();

    files.retain(|file| {
        folders.is_empty() || folders.iter().any(|folder| is_in_folder(&file.path, folder))
    });
    files.retain(|file| file.mtime >= start && file.mtime <= end);

    // Stable sort keeps listing order for equal mtimes
    files.sort_by(|a, b| b.mtime.cmp(&a.mtime));

    let notes = files
        .into_iter()
        .map(|file| {
            let content = storage.read_file(&file.path)?;
            let title = extract_title(&content, &file.path);
            Ok(NoteMetadata {
                path: file.path,
                title,
                mtime: file.mtime,
                content,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(listed, matched = notes.len(), "scan_notes");
    trace_time!(started, "scan_notes", matched = notes.len());
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use crate::vault::{FileEntry, MemoryVault};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (at("2025-01-13T00:00:00Z"), at("2025-01-19T23:59:59Z"))
    }

    fn paths(notes: &[NoteMetadata]) -> Vec<&str> {
        notes.iter().map(|n| n.path.as_str()).collect()
    }

    #[test]
    fn test_empty_folders_scans_whole_vault() {
        let vault = MemoryVault::new()
            .with_file("a.md", "a", at("2025-01-14T10:00:00Z"))
            .with_file("projects/b.md", "b", at("2025-01-15T10:00:00Z"));
        let (start, end) = window();

        let notes = scan_notes(&vault, &[], start, end).unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_folder_filter_is_recursive() {
        let vault = MemoryVault::new()
            .with_file("projects/sub/deep/note.md", "deep", at("2025-01-14T10:00:00Z"))
            .with_file("projects/top.md", "top", at("2025-01-14T11:00:00Z"))
            .with_file("other/note.md", "other", at("2025-01-14T12:00:00Z"))
            .with_file("projects-archive/old.md", "old", at("2025-01-14T13:00:00Z"));
        let (start, end) = window();

        let notes = scan_notes(&vault, &["projects".to_string()], start, end).unwrap();
        assert_eq!(paths(&notes), vec!["projects/top.md", "projects/sub/deep/note.md"]);
    }

    #[test]
    fn test_folder_trailing_slash_is_normalized() {
        let vault = MemoryVault::new()
            .with_file("journal/day.md", "d", at("2025-01-14T10:00:00Z"))
            .with_file("inbox/x.md", "x", at("2025-01-14T10:00:00Z"));
        let (start, end) = window();

        let notes = scan_notes(&vault, &["journal/".to_string()], start, end).unwrap();
        assert_eq!(paths(&notes), vec!["journal/day.md"]);
    }

    #[test]
    fn test_time_window_is_inclusive() {
        let (start, end) = window();
        let vault = MemoryVault::new()
            .with_file("start.md", "", start)
            .with_file("end.md", "", end)
            .with_file("before.md", "", at("2025-01-12T23:59:59Z"))
            .with_file("after.md", "", at("2025-01-20T00:00:00Z"));

        let notes = scan_notes(&vault, &[], start, end).unwrap();
        assert_eq!(paths(&notes), vec!["end.md", "start.md"]);
    }

    #[test]
    fn test_sorted_newest_first_with_titles_and_content() {
        let vault = MemoryVault::new()
            .with_file("old.md", "old body", at("2025-01-13T09:00:00Z"))
            .with_file(
                "new.md",
                "---\ntitle: \"Fresh Note\"\n---\nnew body",
                at("2025-01-18T09:00:00Z"),
            )
            .with_file("mid.md", "mid body", at("2025-01-15T09:00:00Z"));
        let (start, end) = window();

        let notes = scan_notes(&vault, &[], start, end).unwrap();
        assert_eq!(paths(&notes), vec!["new.md", "mid.md", "old.md"]);
        assert_eq!(notes[0].title, "Fresh Note");
        assert_eq!(notes[1].title, "mid");
        assert_eq!(notes[2].content, "old body");
    }

    #[test]
    fn test_empty_vault() {
        let (start, end) = window();
        let notes = scan_notes(&MemoryVault::new(), &[], start, end).unwrap();
        assert!(notes.is_empty());
    }

    /// Lists a file it cannot read
    struct BrokenVault;

    impl VaultStorage for BrokenVault {
        fn list_markdown_files(&self) -> Result<Vec<FileEntry>> {
            Ok(vec![FileEntry {
                path: "ghost.md".to_string(),
                mtime: at("2025-01-14T10:00:00Z"),
            }])
        }
        fn read_file(&self, path: &str) -> Result<String> {
            Err(ReviewError::not_found("file", path))
        }
        fn create_file(&self, _path: &str, _content: &str) -> Result<()> {
            Ok(())
        }
        fn file_exists(&self, _path: &str) -> Result<bool> {
            Ok(false)
        }
        fn list_files_in_folder(&self, _folder: &str) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_read_failure_propagates() {
        let (start, end) = window();
        let err = scan_notes(&BrokenVault, &[], start, end).unwrap_err();
        assert!(matches!(err, ReviewError::NotFound { .. }));
    }
}
