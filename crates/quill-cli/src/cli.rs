//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use quill_domain::Section;
use std::path::PathBuf;

/// Quill CLI - Manuscript integrity control.
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a drafted section against the evidence store
    Validate(ValidateArgs),

    /// Trace a flagged citation back to its root cause
    Trace(TraceArgs),

    /// Draft sections through the configured drafter command
    Draft(DraftArgs),

    /// Assemble accepted sections into a manuscript and validate it
    Assemble(AssembleArgs),

    /// Show ledger state: completions and review versions
    Status,

    /// Summarize evidence-store and audit-trail statistics
    Report,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Markdown file holding the section body
    #[arg(short = 'F', long)]
    pub file: PathBuf,

    /// Which section the file is
    #[arg(short, long)]
    pub section: Section,

    /// Promote section-appropriateness findings to errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the trace command.
#[derive(Debug, Parser)]
pub struct TraceArgs {
    /// The citation key to trace (e.g. smith2024)
    pub key: String,

    /// The section the flag came from
    pub section: Section,
}

/// Arguments for the draft command.
#[derive(Debug, Parser)]
pub struct DraftArgs {
    /// Sections to draft; all six when omitted
    pub sections: Vec<Section>,

    /// Override the configured concurrency bound
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

/// Arguments for the assemble command.
#[derive(Debug, Parser)]
pub struct AssembleArgs {
    /// Bibliography file, one citation key per line
    #[arg(short, long)]
    pub bibliography: Option<PathBuf>,
}
