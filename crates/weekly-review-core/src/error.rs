//! Error types and exit codes for weekly-review
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (LLM, IO, filename exhaustion)
//! - 2: Usage error (bad flags/args, invalid input)
//! - 3: Data error (missing note, file already exists, invalid config)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the weekly-review binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing note, invalid config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building a review
#[derive(Error, Debug)]
pub enum ReviewError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Data errors (exit code 3)
    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    /// The chat endpoint could not produce a usable reply
    #[error("{0}")]
    Llm(String),

    /// Every numbered filename variant is already taken
    #[error("could not find available filename after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl ReviewError {
    /// Create an error for rejected caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ReviewError::InvalidInput(message.into())
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ReviewError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        ReviewError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        ReviewError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ReviewError::UsageError(_) | ReviewError::InvalidInput(_) => ExitCode::Usage,

            ReviewError::NotFound { .. }
            | ReviewError::AlreadyExists { .. }
            | ReviewError::InvalidConfig { .. } => ExitCode::Data,

            ReviewError::Llm(_)
            | ReviewError::Exhausted { .. }
            | ReviewError::Io(_)
            | ReviewError::Json(_)
            | ReviewError::Toml(_)
            | ReviewError::FailedOperationWithTarget { .. }
            | ReviewError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ReviewError::UsageError(_) => "usage_error",
            ReviewError::InvalidInput(_) => "invalid_input",
            ReviewError::NotFound { .. } => "not_found",
            ReviewError::AlreadyExists { .. } => "already_exists",
            ReviewError::InvalidConfig { .. } => "invalid_config",
            ReviewError::Llm(_) => "llm_error",
            ReviewError::Exhausted { .. } => "exhausted",
            ReviewError::Io(_) => "io_error",
            ReviewError::Json(_) => "json_error",
            ReviewError::Toml(_) => "toml_error",
            ReviewError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            ReviewError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for weekly-review operations
pub type Result<T> = std::result::Result<T, ReviewError>;
