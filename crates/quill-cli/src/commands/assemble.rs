//! Assemble command implementation.

use crate::cli::AssembleArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use quill_pipeline::Pipeline;
use quill_validator::extract;
use std::fs;

/// Execute the assemble command. Returns whether the manuscript verdict
/// passed.
pub fn execute_assemble(
    args: AssembleArgs,
    pipeline: &mut Pipeline,
    config: &Config,
    formatter: &Formatter,
) -> Result<bool> {
    // Reload accepted drafts written by earlier `draft` invocations
    let mut docs = Vec::new();
    for section in pipeline.status().completed {
        let path = config.section_file(section);
        if path.exists() {
            let body = fs::read_to_string(&path)?;
            docs.push(extract::section_document(section, &body));
        } else {
            tracing::warn!(section = section.as_str(), "completed section has no draft file");
        }
    }
    pipeline.restore_accepted(docs);

    let bibliography = config.read_bibliography(args.bibliography.as_deref())?;
    let (manuscript, verdict) = pipeline.assemble_manuscript(bibliography)?;

    if verdict.passed() {
        fs::write(&config.paths.manuscript, &manuscript.body)?;
        println!(
            "{}",
            formatter.success(&format!(
                "manuscript written to {}",
                config.paths.manuscript.display()
            ))
        );
    }
    println!("{}", formatter.format_verdict(&verdict)?);
    Ok(verdict.passed())
}
