//! Phase module - named workflow phases and review kinds

use serde::{Deserialize, Serialize};

/// A named workflow phase
///
/// The pipeline moves through these phases in order; the Workflow State
/// Ledger records which units each phase has accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Static analysis of the source repository
    Analyze,

    /// Outline planning
    Plan,

    /// Literature research (populates the Evidence Store)
    Research,

    /// Section drafting
    Draft,

    /// Manuscript assembly
    Assemble,

    /// Critique/review iterations
    Review,
}

impl Phase {
    /// Get the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Analyze => "analyze",
            Phase::Plan => "plan",
            Phase::Research => "research",
            Phase::Draft => "draft",
            Phase::Assemble => "assemble",
            Phase::Review => "review",
        }
    }

    /// Parse a phase from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "analyze" => Some(Phase::Analyze),
            "plan" => Some(Phase::Plan),
            "research" => Some(Phase::Research),
            "draft" => Some(Phase::Draft),
            "assemble" => Some(Phase::Assemble),
            "review" => Some(Phase::Review),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of review iteration recorded in the ledger
///
/// Reviews are versioned per kind; a content review and a format review
/// of the same manuscript carry independent version counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    /// Scientific validity, argument strength, evidence quality
    Content,

    /// Structure, style, and journal formatting
    Format,

    /// Outline review before drafting starts
    Outline,
}

impl ReviewKind {
    /// Get the review kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Content => "content",
            ReviewKind::Format => "format",
            ReviewKind::Outline => "outline",
        }
    }

    /// Parse a review kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "content" => Some(ReviewKind::Content),
            "format" => Some(ReviewKind::Format),
            "outline" => Some(ReviewKind::Outline),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
