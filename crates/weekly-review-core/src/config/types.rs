//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::filenames::DEFAULT_MAX_FILENAME_ATTEMPTS;
use crate::period::PeriodPreset;

/// Upper bound for `review.max_notes`
pub const MAX_NOTES_CAP: usize = 500;
/// Upper bound for `review.max_chars_per_note`
pub const MAX_CHARS_PER_NOTE_CAP: usize = 50_000;
/// Upper bound for `review.max_filename_attempts`
pub const MAX_FILENAME_ATTEMPTS_CAP: u32 = 10_000;

/// Full user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Chat endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Review pipeline settings
    #[serde(default)]
    pub review: ReviewSettings,
}

/// Chat-completion endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Sent as `options.num_predict`
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional auth header, sent only when both name and value are non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_header_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_header_value: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout_seconds(),
            api_key_header_name: None,
            api_key_header_value: None,
        }
    }
}

/// Review pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// Vault folder that receives generated reviews
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folders to scan; empty means the whole vault
    #[serde(default)]
    pub scan_folders: Vec<String>,

    #[serde(default)]
    pub default_preset: PeriodPreset,

    /// IANA zone used for calendar presets, week starts and filenames
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Replaces the built-in reviewer persona when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(default = "default_max_notes")]
    pub max_notes: usize,

    #[serde(default = "default_max_chars_per_note")]
    pub max_chars_per_note: usize,

    #[serde(default = "default_max_filename_attempts")]
    pub max_filename_attempts: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            scan_folders: Vec::new(),
            default_preset: PeriodPreset::default(),
            timezone: default_timezone(),
            system_prompt: None,
            max_notes: default_max_notes(),
            max_chars_per_note: default_max_chars_per_note(),
            max_filename_attempts: default_max_filename_attempts(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_endpoint_path() -> String {
    "/api/chat".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_output_folder() -> String {
    "Weekly Reviews".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_max_notes() -> usize {
    50
}

fn default_max_chars_per_note() -> usize {
    2000
}

fn default_max_filename_attempts() -> u32 {
    DEFAULT_MAX_FILENAME_ATTEMPTS
}
