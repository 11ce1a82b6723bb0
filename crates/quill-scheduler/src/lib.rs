//! Quill Section Dependency Scheduler
//!
//! A small DAG task runner for section drafting:
//!
//! - the dependency table fixes which sections must complete before
//!   others may start (the abstract goes last; it depends on everything)
//! - cycle detection runs once, at scheduler construction
//! - dispatch runs ready sections concurrently, bounded by a semaphore
//! - a failed section marks its transitive dependents blocked without
//!   cancelling siblings that are already running
//! - after termination every drafted section is re-validated and the
//!   verdict attached to its outcome
//!
//! Sections already accepted by the Workflow State Ledger count as
//! satisfied dependencies, so re-dispatching after a partial run only
//! drafts what is still missing.

#![warn(missing_docs)]

mod deps;
mod drafter;
mod error;
mod scheduler;

pub use deps::DependencyTable;
pub use drafter::{DraftError, SectionDrafter};
pub use error::ScheduleError;
pub use scheduler::{CancelFlag, Scheduler, TaskOutcome, TaskStatus, DEFAULT_MAX_CONCURRENT};
