//! Audit module - append-only records of citation evaluations

use crate::Section;
use serde::{Deserialize, Serialize};

/// Which validation layer produced an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLayer {
    /// Layer 1: entry validation against the Evidence Store
    Entry,

    /// Layer 2: section-appropriateness rules
    Business,

    /// Layer 3: manuscript-wide assembly checks
    Assembly,
}

impl ValidationLayer {
    /// Layer number (1-3) for reports
    pub fn number(&self) -> u8 {
        match self {
            ValidationLayer::Entry => 1,
            ValidationLayer::Business => 2,
            ValidationLayer::Assembly => 3,
        }
    }
}

/// Outcome of evaluating one citation at one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerOutcome {
    /// The citation satisfied the layer's rule
    Pass,

    /// The citation violated the layer's rule
    Fail,
}

/// An immutable record of one citation evaluation
///
/// The audit trail is the union of all entries ever recorded; it is read
/// by the root-cause tracer and never rewritten. Entries for a given key
/// appear in the real-time order their validations occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Citation key evaluated
    pub key: String,

    /// Section the evaluation applied to
    pub section: Section,

    /// When the evaluation occurred (milliseconds since Unix epoch)
    pub timestamp: u64,

    /// Which layer evaluated the citation
    pub layer: ValidationLayer,

    /// Whether the citation satisfied the layer's rule
    pub outcome: LayerOutcome,
}

impl AuditEntry {
    /// Create a new audit entry
    pub fn new(
        key: impl Into<String>,
        section: Section,
        timestamp: u64,
        layer: ValidationLayer,
        outcome: LayerOutcome,
    ) -> Self {
        Self {
            key: key.into(),
            section,
            timestamp,
            layer,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_numbers() {
        assert_eq!(ValidationLayer::Entry.number(), 1);
        assert_eq!(ValidationLayer::Business.number(), 2);
        assert_eq!(ValidationLayer::Assembly.number(), 3);
    }

    #[test]
    fn test_entry_serializes_as_flat_record() {
        let entry = AuditEntry::new(
            "smith2024",
            Section::Methods,
            42,
            ValidationLayer::Entry,
            LayerOutcome::Pass,
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["key"], "smith2024");
        assert_eq!(json["section"], "methods");
        assert_eq!(json["layer"], "entry");
        assert_eq!(json["outcome"], "pass");
    }
}
