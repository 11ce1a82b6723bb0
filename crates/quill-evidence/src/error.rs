//! Errors for evidence storage operations

use thiserror::Error;

/// Errors that can occur in the evidence layer
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted row could not be parsed
    #[error("Malformed record at line {line}: {reason}")]
    Malformed {
        /// 1-based line number in the persisted file
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// Attempt to insert a key that already exists
    #[error("Citation key already exists: {0}")]
    KeyExists(String),

    /// Operation on a key the store does not hold
    #[error("Citation key not found: {0}")]
    KeyNotFound(String),

    /// JSON (de)serialization error in the audit trail
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
