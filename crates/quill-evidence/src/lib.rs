//! Quill Evidence Layer
//!
//! Durable storage for the two append-only records the validation
//! pipeline depends on:
//!
//! - **Evidence Store**: citation key -> verified metadata, persisted as
//!   an append-only tabular file (one citation per row)
//! - **Audit Trail**: one line-oriented JSON record per citation
//!   evaluation, funneled through a single writer
//!
//! # Concurrency
//!
//! The Evidence Store is read-shared by concurrent validators; appends go
//! through a single-writer gate to preserve key uniqueness. Audit appends
//! are serialized so entries for a given key land in the real-time order
//! their validations occurred.
//!
//! # Examples
//!
//! ```no_run
//! use quill_evidence::EvidenceStore;
//!
//! let store = EvidenceStore::open("manuscript/literature_evidence.tsv").unwrap();
//! assert!(store.get("smith2024").is_none() || store.get("smith2024").is_some());
//! ```

#![warn(missing_docs)]

mod audit;
mod error;
mod report;
mod store;

pub use audit::AuditTrail;
pub use error::EvidenceError;
pub use report::EvidenceReport;
pub use store::EvidenceStore;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
