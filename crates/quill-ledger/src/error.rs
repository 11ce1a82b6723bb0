//! Ledger error type

use quill_domain::{ReviewKind, Section};
use thiserror::Error;

/// Errors from the Workflow State Ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    /// I/O error reading or writing the ledger file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger file could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A failing verdict was offered to the completion gate
    #[error("verification gate violation: {section} cannot complete ({summary})")]
    VerificationGateViolation {
        /// Section whose completion was rejected
        section: Section,
        /// Summary of the failing verdict
        summary: String,
    },

    /// A failing verdict was offered to the assembly gate
    #[error("verification gate violation: assembly cannot complete ({summary})")]
    AssemblyGateViolation {
        /// Summary of the failing verdict
        summary: String,
    },

    /// A review version did not strictly increase
    #[error("{kind} review version {version} not above recorded {highest}")]
    VersionNotMonotonic {
        /// Review kind whose version was rejected
        kind: ReviewKind,
        /// Version offered
        version: u32,
        /// Highest version already recorded
        highest: u32,
    },
}
