//! Vault storage capability
//!
//! The review pipeline only talks to storage through [`VaultStorage`]. Paths
//! are vault-relative and `/`-separated regardless of platform.

mod fs;
mod memory;

use chrono::{DateTime, Utc};

use crate::error::Result;

pub use fs::FsVault;
pub use memory::MemoryVault;

/// A markdown document as listed by the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub mtime: DateTime<Utc>,
}

/// Storage operations the review pipeline needs from its host
pub trait VaultStorage {
    /// All markdown documents with their last-modified instants
    fn list_markdown_files(&self) -> Result<Vec<FileEntry>>;

    /// Full text of a document; `NotFound` when the path does not exist
    fn read_file(&self, path: &str) -> Result<String>;

    /// Create a new document, creating parent folders as needed
    fn create_file(&self, path: &str, content: &str) -> Result<()>;

    fn file_exists(&self, path: &str) -> Result<bool>;

    /// Markdown paths inside `folder` (recursive); the whole vault when empty
    fn list_files_in_folder(&self, folder: &str) -> Result<Vec<String>>;
}

/// Strip a single trailing slash from a folder path
pub fn normalize_folder(folder: &str) -> &str {
    folder.strip_suffix('/').unwrap_or(folder)
}

/// Whether `path` is `folder` itself or lives somewhere beneath it
pub fn is_in_folder(path: &str, folder: &str) -> bool {
    path == folder
        || path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Paths from `paths` that sit under `folder`, or all of them when `folder` is empty
fn filter_folder<'a>(paths: impl Iterator<Item = &'a str>, folder: &str) -> Vec<String> {
    let folder = normalize_folder(folder);
    paths
        .filter(|path| folder.is_empty() || (is_in_folder(path, folder) && *path != folder))
        .map(str::to_string)
        .collect()
}
