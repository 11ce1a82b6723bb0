//! Quill Domain Layer
//!
//! This crate contains the core domain model for Quill's manuscript
//! integrity-control pipeline. It defines the fundamental concepts and
//! trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Citation**: a literature reference with a required persistent
//!   identifier, a supporting quote, and a usage-type tag
//! - **Section**: one of the closed set of manuscript sections
//! - **SectionDocument**: a drafted section with extracted citation
//!   references and a validation state
//! - **Verdict**: the structured pass/fail result of one validation call
//! - **AuditEntry**: an immutable record of one citation evaluation
//! - **Phase**: the named workflow phases (analyze through review)
//!
//! ## Architecture
//!
//! - Serialization derives only; no infrastructure here
//! - Trait definitions for all external collaborators
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod citation;
pub mod document;
pub mod phase;
pub mod section;
pub mod traits;
pub mod usage;
pub mod verdict;

// Re-exports for convenience
pub use audit::{AuditEntry, LayerOutcome, ValidationLayer};
pub use citation::Citation;
pub use document::{DocumentState, Manuscript, SectionDocument};
pub use phase::{Phase, ReviewKind};
pub use section::Section;
pub use usage::UsageType;
pub use verdict::{Finding, FindingKind, Remediation, Verdict, VerdictStatus};
