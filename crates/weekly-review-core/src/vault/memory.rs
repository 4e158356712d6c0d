//! In-memory vault backing the pipeline and storage unit tests

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{filter_folder, FileEntry, VaultStorage};
use crate::error::{ReviewError, Result};

#[derive(Debug, Clone)]
struct MemoryFile {
    content: String,
    mtime: DateTime<Utc>,
}

/// A vault held entirely in memory. Created files are stamped with the
/// instant passed to [`MemoryVault::with_clock`] (default: the Unix epoch).
#[derive(Debug, Default)]
pub struct MemoryVault {
    files: RefCell<BTreeMap<String, MemoryFile>>,
    clock: DateTime<Utc>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp files created through [`VaultStorage::create_file`] with `now`
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = now;
        self
    }

    /// Insert or replace a document
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>, mtime: DateTime<Utc>) {
        self.files.borrow_mut().insert(
            path.into(),
            MemoryFile {
                content: content.into(),
                mtime,
            },
        );
    }

    /// Builder-style [`MemoryVault::insert`]
    pub fn with_file(
        self,
        path: impl Into<String>,
        content: impl Into<String>,
        mtime: DateTime<Utc>,
    ) -> Self {
        self.insert(path, content, mtime);
        self
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl VaultStorage for MemoryVault {
    fn list_markdown_files(&self) -> Result<Vec<FileEntry>> {
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|(path, _)| path.ends_with(".md"))
            .map(|(path, file)| FileEntry {
                path: path.clone(),
                mtime: file.mtime,
            })
            .collect())
    }

    fn read_file(&self, path: &str) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .map(|file| file.content.clone())
            .ok_or_else(|| ReviewError::not_found("file", path))
    }

    fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let mut files = self.files.borrow_mut();
        if files.contains_key(path) {
            return Err(ReviewError::already_exists("file", path));
        }
        files.insert(
            path.to_string(),
            MemoryFile {
                content: content.to_string(),
                mtime: self.clock,
            },
        );
        Ok(())
    }

    fn file_exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.borrow().contains_key(path))
    }

    fn list_files_in_folder(&self, folder: &str) -> Result<Vec<String>> {
        let files = self.files.borrow();
        Ok(filter_folder(
            files.keys().map(String::as_str).filter(|p| p.ends_with(".md")),
            folder,
        ))
    }
}
