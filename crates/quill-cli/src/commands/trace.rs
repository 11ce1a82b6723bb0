//! Trace command implementation.

use crate::cli::TraceArgs;
use crate::error::Result;
use crate::output::Formatter;
use quill_pipeline::Pipeline;

/// Execute the trace command.
pub fn execute_trace(args: TraceArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<bool> {
    let trace = pipeline.trace(&args.key, args.section);
    println!("{}", formatter.format_trace(&trace)?);
    Ok(true)
}
