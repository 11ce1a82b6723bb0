//! Draft command implementation.

use crate::cli::DraftArgs;
use crate::config::Config;
use crate::drafter::CommandDrafter;
use crate::error::Result;
use crate::output::Formatter;
use quill_domain::Section;
use quill_pipeline::Pipeline;
use quill_scheduler::TaskStatus;
use std::fs;
use std::sync::Arc;

/// Execute the draft command. Returns whether every requested section
/// ended up accepted.
pub async fn execute_draft(
    args: DraftArgs,
    pipeline: &mut Pipeline,
    config: &Config,
    formatter: &Formatter,
) -> Result<bool> {
    let sections: Vec<Section> = if args.sections.is_empty() {
        Section::ALL.to_vec()
    } else {
        args.sections.clone()
    };

    let drafter = Arc::new(CommandDrafter::new(
        &config.draft.command,
        config.draft.args.clone(),
    ));
    let outcomes = pipeline.draft(&sections, drafter).await?;

    fs::create_dir_all(&config.paths.sections)?;

    let mut all_accepted = true;
    for section in &sections {
        let Some(outcome) = outcomes.get(section) else {
            // Filtered out before dispatch: already in the ledger
            println!("{}", formatter.success(&format!("{}: already completed", section)));
            continue;
        };
        match outcome.status {
            TaskStatus::Completed => {
                let passed = outcome.verdict.as_ref().is_some_and(|v| v.passed());
                if passed {
                    if let Some(doc) = &outcome.document {
                        fs::write(config.section_file(*section), &doc.body)?;
                    }
                    println!("{}", formatter.success(&format!("{}: drafted and accepted", section)));
                } else {
                    all_accepted = false;
                    println!(
                        "{}",
                        formatter.error(&format!("{}: drafted but failed validation", section))
                    );
                    if let Some(verdict) = &outcome.verdict {
                        println!("{}", formatter.format_verdict(verdict)?);
                    }
                }
            }
            TaskStatus::Failed => {
                all_accepted = false;
                let reason = outcome.error.as_deref().unwrap_or("unknown failure");
                println!("{}", formatter.error(&format!("{}: {}", section, reason)));
            }
            TaskStatus::Blocked => {
                all_accepted = false;
                println!(
                    "{}",
                    formatter.warning(&format!("{}: blocked by a failed dependency", section))
                );
            }
            _ => {
                all_accepted = false;
                println!("{}", formatter.warning(&format!("{}: not started", section)));
            }
        }
    }
    Ok(all_accepted)
}
