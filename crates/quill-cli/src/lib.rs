//! Quill CLI library.
//!
//! This library provides the core functionality for the `quill`
//! command-line interface: project configuration, command execution,
//! the subprocess-backed drafter and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod drafter;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use drafter::CommandDrafter;
pub use error::{CliError, Result};
pub use output::Formatter;
