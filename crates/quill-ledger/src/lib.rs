//! Quill Workflow State Ledger
//!
//! Durable, append-only record of accepted work:
//!
//! - section completions, admitted only with a passing verdict (the
//!   verification gate)
//! - assembly completion, gated the same way
//! - review iterations, versioned per review kind with strictly
//!   increasing version numbers
//!
//! The ledger never rewrites history: a rollback is a new entry, and the
//! derived snapshot is recomputed from the entry list on every read.

#![warn(missing_docs)]

mod error;
mod ledger;

pub use error::LedgerError;
pub use ledger::{Ledger, LedgerEntry, LedgerState};
