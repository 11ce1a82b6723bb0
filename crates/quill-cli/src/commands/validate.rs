//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use quill_pipeline::Pipeline;
use std::fs;

/// Execute the validate command. Returns whether the verdict passed.
pub fn execute_validate(
    args: ValidateArgs,
    pipeline: &Pipeline,
    formatter: &Formatter,
) -> Result<bool> {
    let body = fs::read_to_string(&args.file)?;
    let verdict = pipeline.validate_text(args.section, &body);
    println!("{}", formatter.format_verdict(&verdict)?);
    Ok(verdict.passed())
}
