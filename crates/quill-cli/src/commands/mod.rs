//! Command implementations.

pub mod assemble;
pub mod draft;
pub mod report;
pub mod status;
pub mod trace;
pub mod validate;

pub use self::assemble::execute_assemble;
pub use self::draft::execute_draft;
pub use self::report::execute_report;
pub use self::status::execute_status;
pub use self::trace::execute_trace;
pub use self::validate::execute_validate;
