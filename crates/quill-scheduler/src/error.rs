//! Scheduler error type

use thiserror::Error;

/// Errors from scheduler construction and dispatch
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The dependency table contains a cycle
    #[error("dependency table contains a cycle")]
    DependencyCycle,
}
