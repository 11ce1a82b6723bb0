//! Citation module - one evidenced literature reference

use crate::{Phase, UsageType};
use serde::{Deserialize, Serialize};

/// A citation held in the Evidence Store
///
/// Citations are immutable once created, with one exception: the
/// supporting quote may be amended. Removal is never silent - it requires
/// an explicit retraction record in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Citation key, unique within a project (e.g. "smith2024")
    pub key: String,

    /// Required persistent identifier (e.g. a DOI)
    pub doi: String,

    /// Quote from the source supporting its use
    pub quote: String,

    /// Why this citation is used
    pub usage: UsageType,

    /// When this citation was added (milliseconds since Unix epoch)
    pub added_at: u64,

    /// Workflow phase that introduced this citation
    pub phase: Phase,
}

impl Citation {
    /// Create a new citation
    pub fn new(
        key: impl Into<String>,
        doi: impl Into<String>,
        quote: impl Into<String>,
        usage: UsageType,
        added_at: u64,
        phase: Phase,
    ) -> Self {
        Self {
            key: key.into(),
            doi: doi.into(),
            quote: quote.into(),
            usage,
            added_at,
            phase,
        }
    }

    /// Whether the persistent identifier is present
    pub fn has_identifier(&self) -> bool {
        !self.doi.trim().is_empty()
    }
}
