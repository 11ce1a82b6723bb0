//! Quill Root-Cause Tracer
//!
//! Walks a flagged citation back through five diagnostic levels:
//!
//! 1. **Symptom** - what was reported, and where
//! 2. **Immediate cause** - how the key resolves against the Evidence
//!    Store right now
//! 3. **Usage trace** - the key's full Audit Trail history
//! 4. **Origin** - which workflow phase introduced the citation
//! 5. **Trigger** - the classified root cause and the action that fixes it
//!
//! Tracing is read-only: it never mutates the store, the trail, or any
//! verdict. A key with no history still yields all five levels, with the
//! evidence-free levels reporting that no record was found.

#![warn(missing_docs)]

mod tracer;

pub use tracer::{trace, CauseKind, Trace, TraceLevel, TraceStep};
