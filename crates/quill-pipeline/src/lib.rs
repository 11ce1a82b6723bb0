//! Quill Pipeline
//!
//! The phase coordinator. Owns the Evidence Store, Audit Trail, Workflow
//! State Ledger, validator and scheduler, and exposes one operation per
//! workflow phase:
//!
//! - `research_intake` appends candidate citations to the Evidence Store
//! - `draft` dispatches section drafting and records passing sections
//! - `assemble` combines accepted sections, runs manuscript-wide
//!   validation and records assembly on pass
//! - `record_review` appends a versioned review iteration
//! - `trace` explains a flagged citation
//!
//! Callers map `Verdict::passed()` to their own exit semantics; the
//! pipeline itself never exits.

#![warn(missing_docs)]

mod error;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::Pipeline;
