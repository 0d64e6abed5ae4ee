//! Error types for n1qlgen
//!
//! Rendering never fails; these errors only come from the collaborator side
//! (loading model snapshots, store persistence, template edits).

use thiserror::Error;

/// Result type alias for n1qlgen operations
pub type GenResult<T> = Result<T, GenError>;

/// Error types for model loading and the history/template stores
#[derive(Debug, Error)]
pub enum GenError {
    /// Model or store JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Attempt to modify a built-in entry
    #[error("Read-only: {0}")]
    ReadOnly(String),
}

impl GenError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a read-only error
    pub fn read_only(message: impl Into<String>) -> Self {
        Self::ReadOnly(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a read-only error
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }
}
