//! Report command implementation.

use crate::error::Result;
use crate::output::Formatter;
use quill_pipeline::Pipeline;

/// Execute the report command.
pub fn execute_report(pipeline: &Pipeline, formatter: &Formatter) -> Result<bool> {
    println!("{}", formatter.format_report(&pipeline.evidence_report())?);
    Ok(true)
}
