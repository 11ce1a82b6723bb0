//! Pipeline error type

use thiserror::Error;

/// Errors from phase coordination
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The evidence layer failed
    #[error("Evidence error: {0}")]
    Evidence(#[from] quill_evidence::EvidenceError),

    /// The ledger rejected a record
    #[error("Ledger error: {0}")]
    Ledger(#[from] quill_ledger::LedgerError),

    /// The scheduler could not be constructed
    #[error("Schedule error: {0}")]
    Schedule(#[from] quill_scheduler::ScheduleError),

    /// Assembly was requested before any section was accepted
    #[error("no accepted sections to assemble")]
    NothingToAssemble,
}
