//! Core error types.
//!
//! Defined in `tutorforge-core` so callers can classify failures (missing
//! student record vs. damaged source) without string matching.

use thiserror::Error;

/// Errors produced by the question bank and ledger storage.
#[derive(Debug, Error)]
pub enum TutorError {
    /// The question source is missing a required column or cannot be parsed.
    #[error("failed to load question source: {0}")]
    Load(String),

    /// No durable record exists for the requested student.
    #[error("no record found for student '{0}'")]
    StudentNotFound(String),

    /// An underlying file operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A ledger artifact could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The question source could not be read as CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl TutorError {
    /// Returns `true` if this error means the requested record is absent
    /// rather than damaged.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TutorError::StudentNotFound(_))
    }
}
