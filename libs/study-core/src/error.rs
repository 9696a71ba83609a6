//! Error types for study-core.
//!
//! Parsing the study document is deliberately infallible (malformed input
//! degrades to fewer sections, never an error), so the fallible surface of
//! this crate is the storage port and the question-id string form.

use thiserror::Error;

/// Result type alias using StorageError.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur at the key-value storage port.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A question-id string that does not have the `<sectionId>-<ordinal>` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid question id: {0:?}")]
pub struct InvalidQuestionId(pub String);
