//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Evidence layer error
    #[error("Evidence error: {0}")]
    Evidence(#[from] quill_evidence::EvidenceError),

    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] quill_ledger::LedgerError),

    /// Pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] quill_pipeline::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
