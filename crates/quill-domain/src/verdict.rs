//! Verdict module - the structured result of one validation call

use crate::{Section, UsageType};
use serde::{Deserialize, Serialize};

/// Overall status of a validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// No errors found
    Pass,

    /// At least one error found
    Fail,
}

/// The kind of a typed validation finding
///
/// Each variant carries the facts needed to explain the finding without
/// re-parsing prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// Layer 1: citation key absent from the Evidence Store (or present
    /// without a persistent identifier)
    UnverifiedCitation {
        /// The offending citation key
        key: String,
    },

    /// Layer 2: usage type not appropriate for the section
    InappropriateCitationContext {
        /// The offending citation key
        key: String,
        /// The citation's usage type
        usage: UsageType,
        /// The section it was used in
        section: Section,
    },

    /// Layer 2: section cites more than its ceiling allows
    CitationCeilingExceeded {
        /// The section over its ceiling
        section: Section,
        /// Number of citations found
        count: usize,
        /// Maximum allowed
        ceiling: usize,
    },

    /// Layer 3: a citation appears in the text but not the bibliography,
    /// or vice versa
    OrphanedReference {
        /// The orphaned citation key
        key: String,
        /// Where the key was found ("text" or "bibliography")
        found_in: String,
    },

    /// Layer 3: text citations and bibliography have diverged
    BibliographyDesync {
        /// Keys cited in text but missing from the bibliography
        missing_from_bibliography: Vec<String>,
        /// Bibliography entries never cited in text
        missing_from_text: Vec<String>,
    },

    /// Layer 3: manuscript exceeds an aggregate limit
    AggregateLimitExceeded {
        /// What was limited ("citations" or "tables")
        what: String,
        /// Observed count
        count: usize,
        /// Configured limit
        limit: usize,
    },

    /// Section word count outside the acceptable range
    WordCountOutOfRange {
        /// The section checked
        section: Section,
        /// Observed word count
        words: usize,
        /// Lower bound of the acceptable range
        min: usize,
        /// Upper bound of the acceptable range
        max: usize,
    },
}

/// Suggested corrective action for a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    /// Add the citation to the Evidence Store with DOI and quote
    AddToEvidenceStore,

    /// Reclassify the citation's usage type
    ReclassifyUsageType,

    /// Move the citation to a section where its usage type is allowed
    MoveCitation,

    /// Remove the citation from the text
    RemoveCitation,

    /// Adjust the section's length toward its target
    AdjustLength,

    /// Reconcile text citations with the bibliography
    ReconcileBibliography,
}

impl Remediation {
    /// Human-readable description of the action
    pub fn describe(&self) -> &'static str {
        match self {
            Remediation::AddToEvidenceStore => {
                "add the citation to the evidence store with its DOI and a supporting quote"
            }
            Remediation::ReclassifyUsageType => "reclassify the citation's usage type",
            Remediation::MoveCitation => "move the citation to a section that allows its usage type",
            Remediation::RemoveCitation => "remove the citation from the text",
            Remediation::AdjustLength => "adjust the section length toward its target word count",
            Remediation::ReconcileBibliography => {
                "reconcile the text citations with the bibliography"
            }
        }
    }
}

/// One typed validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// What was found
    #[serde(flatten)]
    pub kind: FindingKind,

    /// Human-readable explanation
    pub message: String,

    /// Suggested corrective action, when one applies
    pub remediation: Option<Remediation>,
}

impl Finding {
    /// Create a finding with a remediation suggestion
    pub fn new(kind: FindingKind, message: impl Into<String>, remediation: Remediation) -> Self {
        Self {
            kind,
            message: message.into(),
            remediation: Some(remediation),
        }
    }

    /// Create a finding with no remediation suggestion
    pub fn bare(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            remediation: None,
        }
    }
}

/// The structured pass/fail result of one validation call
///
/// Produced fresh on every validation call and never mutated after
/// creation. Serializes to `{status, errors[], warnings[], info[]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Overall status: `Fail` iff `errors` is non-empty
    pub status: VerdictStatus,

    /// Fatal findings, in discovery order
    pub errors: Vec<Finding>,

    /// Advisory findings, in discovery order
    pub warnings: Vec<Finding>,

    /// Informational metrics (word counts, citation counts, ...)
    pub info: Vec<String>,
}

impl Verdict {
    /// Build a verdict from accumulated findings
    ///
    /// Status is derived: any error fails the verdict.
    pub fn from_findings(errors: Vec<Finding>, warnings: Vec<Finding>, info: Vec<String>) -> Self {
        let status = if errors.is_empty() {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        };
        Self {
            status,
            errors,
            warnings,
            info,
        }
    }

    /// A passing verdict with no findings
    pub fn pass() -> Self {
        Self::from_findings(Vec::new(), Vec::new(), Vec::new())
    }

    /// Whether the verdict passed
    ///
    /// This boolean is the process-completion status exposed to callers;
    /// CLIs translate it into their own exit codes.
    pub fn passed(&self) -> bool {
        self.status == VerdictStatus::Pass
    }

    /// One-line summary for ledger records and logs
    pub fn summary(&self) -> String {
        format!(
            "{}: {} error(s), {} warning(s)",
            match self.status {
                VerdictStatus::Pass => "pass",
                VerdictStatus::Fail => "fail",
            },
            self.errors.len(),
            self.warnings.len()
        )
    }
}
