//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the integrity-control core
//! and the components it does not implement: repository analysis,
//! literature search, and format conversion. (The prose-drafting
//! collaborator is async and lives with the scheduler.)

use crate::Citation;
use std::path::Path;

/// Trait for analyzing the source repository
///
/// Implemented outside this workspace; the core only consumes the facts.
pub trait RepositoryAnalyzer {
    /// Error type for analysis operations
    type Error;

    /// Produce structured facts about the repository as markdown
    fn analyze(&self, repository: &Path) -> Result<String, Self::Error>;
}

/// Trait for literature search producing candidate citations
pub trait LiteratureSearch {
    /// Error type for search operations
    type Error;

    /// Search external bibliographic sources for candidate citations
    fn search(&self, query: &str) -> Result<Vec<Citation>, Self::Error>;
}

/// Trait for rendering an assembled manuscript into an external format
pub trait FormatConverter {
    /// Error type for conversion operations
    type Error;

    /// Convert the assembled markdown manuscript at `input` to `output`
    fn convert(&self, input: &Path, output: &Path) -> Result<(), Self::Error>;
}
