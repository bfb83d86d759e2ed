//! Error types for Repbook core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Repbook operations.
pub type Result<T> = std::result::Result<T, RepbookError>;

/// Core error type for Repbook operations.
#[derive(Debug, Error)]
pub enum RepbookError {
    /// Data validation error (empty required field, bad range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Workout plan not found by id
    #[error("Workout plan not found: {0}")]
    PlanNotFound(String),

    /// Generic resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A destructive operation was declined at the confirmation step
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl RepbookError {
    /// True for the "missing resource" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlanNotFound(_) | Self::NotFound(_))
    }
}
