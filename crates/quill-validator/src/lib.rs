//! Quill Citation Validator
//!
//! The four-layer, defense-in-depth citation validation pipeline:
//!
//! 1. **Entry** - every referenced key exists in the Evidence Store with a
//!    persistent identifier (fast-fail, per section, at draft time)
//! 2. **Business** - usage types fit the section and the section stays
//!    under its citation ceiling (advisory; promotable by strict mode)
//! 3. **Assembly** - text citations and bibliography agree in both
//!    directions; aggregate limits hold (manuscript-wide)
//! 4. **Audit** - every evaluation of layers 1-3 is recorded in the Audit
//!    Trail, pass or fail (side effect, never a gate)
//!
//! # Examples
//!
//! ```
//! use quill_validator::{Validator, ValidationConfig, extract};
//! use quill_evidence::{AuditTrail, EvidenceStore};
//! use quill_domain::Section;
//!
//! let store = EvidenceStore::in_memory();
//! let trail = AuditTrail::in_memory();
//! let validator = Validator::new(ValidationConfig::default());
//!
//! let doc = extract::section_document(Section::Methods, "No citations here.");
//! let verdict = validator.validate_section(&doc, &store, &trail);
//! ```

#![warn(missing_docs)]

mod config;
pub mod extract;
mod rules;
mod validator;

pub use config::ValidationConfig;
pub use rules::SectionRules;
pub use validator::{assemble, Validator};
