//! The drafting collaborator seam

use async_trait::async_trait;
use quill_domain::Section;
use thiserror::Error;

/// A drafting attempt failed
#[derive(Error, Debug)]
#[error("draft failed: {0}")]
pub struct DraftError(pub String);

/// Produces the markdown body for one section
///
/// Implementations live outside this crate: the CLI backs this with an
/// external command, tests back it with canned bodies. Drafters may be
/// called concurrently and must be safe to share across tasks.
#[async_trait]
pub trait SectionDrafter: Send + Sync {
    /// Draft one section, returning its markdown body
    async fn draft(&self, section: Section) -> Result<String, DraftError>;
}
