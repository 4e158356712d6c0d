//! User configuration for weekly-review
//!
//! Stored in `<config_dir>/weekly-review/config.toml`. The directory can be
//! overridden with `WEEKLY_REVIEW_CONFIG_DIR`. A missing file yields defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{ReviewError, Result};
use crate::period::{parse_timezone, PeriodPreset};

pub use types::{
    LlmConfig, ReviewConfig, ReviewSettings, MAX_CHARS_PER_NOTE_CAP, MAX_FILENAME_ATTEMPTS_CAP,
    MAX_NOTES_CAP,
};

const CONFIG_DIR: &str = "weekly-review";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "WEEKLY_REVIEW_CONFIG_DIR";

/// Smallest excerpt budget that still fits the `...` marker plus one character
const MIN_CHARS_PER_NOTE: usize = 4;

impl ReviewConfig {
    /// Location of the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    ReviewError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Returns true if the config directory is overridden via environment variable
    pub fn is_config_dir_overridden() -> bool {
        std::env::var(CONFIG_DIR_ENV_VAR).is_ok()
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load, clamp and validate a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ReviewError::io_operation("read config", path.display(), e))?;
        let mut config: ReviewConfig =
            toml::from_str(&content).map_err(|e| ReviewError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            })?;

        config.clamp_limits();
        if let Some(reason) = config.first_problem() {
            return Err(ReviewError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            });
        }

        Ok(config)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).map_err(|e| {
                ReviewError::io_operation("create config directory", config_dir.display(), e)
            })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ReviewError::io_operation("write config to", path.display(), e))?;

        Ok(())
    }

    /// Pretty TOML rendering, as written by [`ReviewConfig::save_to`]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ReviewError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Remember `preset` as the default for future reviews
    pub fn set_default_preset(&mut self, preset: PeriodPreset) {
        self.review.default_preset = preset;
    }

    /// Parsed `review.timezone`
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.review.timezone)
    }

    /// Pull oversized limits down to their hard caps
    pub fn clamp_limits(&mut self) {
        let review = &mut self.review;
        if review.max_notes > MAX_NOTES_CAP {
            warn!(value = review.max_notes, cap = MAX_NOTES_CAP, "max_notes clamped");
            review.max_notes = MAX_NOTES_CAP;
        }
        if review.max_chars_per_note > MAX_CHARS_PER_NOTE_CAP {
            warn!(
                value = review.max_chars_per_note,
                cap = MAX_CHARS_PER_NOTE_CAP,
                "max_chars_per_note clamped"
            );
            review.max_chars_per_note = MAX_CHARS_PER_NOTE_CAP;
        }
        if review.max_filename_attempts > MAX_FILENAME_ATTEMPTS_CAP {
            warn!(
                value = review.max_filename_attempts,
                cap = MAX_FILENAME_ATTEMPTS_CAP,
                "max_filename_attempts clamped"
            );
            review.max_filename_attempts = MAX_FILENAME_ATTEMPTS_CAP;
        }
    }

    /// Check values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        match self.first_problem() {
            Some(reason) => Err(ReviewError::InvalidInput(reason)),
            None => Ok(()),
        }
    }

    fn first_problem(&self) -> Option<String> {
        if self.llm.model.trim().is_empty() {
            return Some("llm.model must not be empty".to_string());
        }
        if self.llm.base_url.trim().is_empty() {
            return Some("llm.base_url must not be empty".to_string());
        }
        if parse_timezone(&self.review.timezone).is_err() {
            return Some(format!("unknown timezone: {}", self.review.timezone));
        }
        if self.review.max_notes == 0 {
            return Some("review.max_notes must be at least 1".to_string());
        }
        if self.review.max_chars_per_note < MIN_CHARS_PER_NOTE {
            return Some(format!(
                "review.max_chars_per_note must be at least {}",
                MIN_CHARS_PER_NOTE
            ));
        }
        if self.review.max_filename_attempts == 0 {
            return Some("review.max_filename_attempts must be at least 1".to_string());
        }
        None
    }
}
