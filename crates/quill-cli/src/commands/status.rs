//! Status command implementation.

use crate::error::Result;
use crate::output::Formatter;
use quill_pipeline::Pipeline;

/// Execute the status command.
pub fn execute_status(pipeline: &Pipeline, formatter: &Formatter) -> Result<bool> {
    println!("{}", formatter.format_status(&pipeline.status())?);
    Ok(true)
}
