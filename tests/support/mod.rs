use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::{tempdir, TempDir};

/// Get a Command for weekly-review
pub fn weekly_review() -> Command {
    cargo_bin_cmd!("weekly-review")
}

/// A throwaway vault plus an isolated config directory
pub struct TestEnv {
    pub vault: TempDir,
    pub config_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            vault: tempdir().unwrap(),
            config_dir: tempdir().unwrap(),
        }
    }

    /// A command bound to this vault and config directory
    pub fn cmd(&self) -> Command {
        let mut cmd = weekly_review();
        cmd.env("WEEKLY_REVIEW_CONFIG_DIR", self.config_dir.path())
            .env_remove("WEEKLY_REVIEW_VAULT")
            .env_remove("RUST_LOG")
            .env_remove("WEEKLY_REVIEW_LOG")
            .arg("--vault")
            .arg(self.vault.path());
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).unwrap();
    }

    /// Write a note relative to the vault root, creating folders as needed
    pub fn write_note(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.vault.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a note whose modification time lies `days` in the past
    pub fn write_old_note(&self, rel: &str, content: &str, days: u64) -> PathBuf {
        let path = self.write_note(rel, content);
        backdate(&path, days);
        path
    }
}

#[allow(dead_code)]
fn backdate(path: &Path, days: u64) {
    let mtime = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}
