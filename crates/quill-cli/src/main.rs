//! Quill CLI - manuscript integrity control from the command line.

use clap::Parser;
use quill_cli::commands;
use quill_cli::output::OutputFormat;
use quill_cli::{Cli, Command, Config, Formatter};
use quill_evidence::{AuditTrail, EvidenceStore};
use quill_ledger::Ledger;
use quill_pipeline::Pipeline;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    config.check()?;

    let format = cli.format.map(Into::into).unwrap_or(OutputFormat::Text);
    let formatter = Formatter::new(format, !cli.no_color);

    // Per-command overrides that shape pipeline construction
    let strict = matches!(&cli.command, Command::Validate(args) if args.strict);
    let max_concurrent = match &cli.command {
        Command::Draft(args) => args.max_concurrent.unwrap_or(config.draft.max_concurrent),
        _ => config.draft.max_concurrent,
    };

    let store = EvidenceStore::open(&config.paths.evidence)?;
    let trail = AuditTrail::open(&config.paths.audit)?;
    let ledger = Ledger::load(&config.paths.ledger)?;
    let mut pipeline = Pipeline::new(
        store,
        trail,
        ledger,
        config.validation_config(strict),
        max_concurrent,
    )?;

    let passed = match cli.command {
        Command::Validate(args) => commands::execute_validate(args, &pipeline, &formatter)?,
        Command::Trace(args) => commands::execute_trace(args, &pipeline, &formatter)?,
        Command::Draft(args) => {
            commands::execute_draft(args, &mut pipeline, &config, &formatter).await?
        }
        Command::Assemble(args) => {
            commands::execute_assemble(args, &mut pipeline, &config, &formatter)?
        }
        Command::Status => commands::execute_status(&pipeline, &formatter)?,
        Command::Report => commands::execute_report(&pipeline, &formatter)?,
    };

    Ok(passed)
}
