//! Filesystem-backed vault

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{filter_folder, FileEntry, VaultStorage};
use crate::error::{ReviewError, Result};

/// A vault rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty()
            || path.starts_with('/')
            || Path::new(path).is_absolute()
            || path.split('/').any(|segment| segment == "..")
        {
            return Err(ReviewError::invalid_input(format!(
                "invalid vault path: {:?}",
                path
            )));
        }
        Ok(self.root.join(path))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }
}

/// Hidden entries (`.obsidian`, `.git`, `.trash`) are not part of the vault
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl VaultStorage for FsVault {
    fn list_markdown_files(&self) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable vault entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !entry.path().extension().is_some_and(|e| e == "md")
            {
                continue;
            }

            let Some(path) = self.relative_path(entry.path()) else {
                continue;
            };

            let modified = entry
                .metadata()
                .map_err(|e| ReviewError::io_operation("stat", &path, e))?
                .modified()
                .map_err(|e| ReviewError::io_operation("read mtime of", &path, e))?;

            files.push(FileEntry {
                path,
                mtime: DateTime::<Utc>::from(modified),
            });
        }

        debug!(root = %self.root.display(), count = files.len(), "list_markdown_files");
        Ok(files)
    }

    fn read_file(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(ReviewError::not_found("file", path));
        }
        fs::read_to_string(&full).map_err(|e| ReviewError::io_operation("read", path, e))
    }

    fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ReviewError::io_operation("create folder", parent.display(), e))?;
        }

        // create_new refuses to clobber a file that appeared after name resolution
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => ReviewError::already_exists("file", path),
                _ => ReviewError::io_operation("create", path, e),
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| ReviewError::io_operation("write", path, e))?;

        debug!(path, bytes = content.len(), "create_file");
        Ok(())
    }

    fn file_exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn list_files_in_folder(&self, folder: &str) -> Result<Vec<String>> {
        let files = self.list_markdown_files()?;
        Ok(filter_folder(files.iter().map(|f| f.path.as_str()), folder))
    }
}
