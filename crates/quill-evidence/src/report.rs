//! Aggregate reporting over the evidence layer

use crate::{AuditTrail, EvidenceStore};
use quill_domain::{LayerOutcome, UsageType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate view of the Evidence Store and the Audit Trail
///
/// A read-only snapshot for status reporting. Gathering never writes to
/// either record.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceReport {
    /// Active (non-retracted) citations in the store
    pub active_citations: usize,

    /// Citations retracted from the store
    pub retracted_citations: usize,

    /// Active citations still awaiting a usage classification
    pub unclassified_citations: usize,

    /// Active citations per usage type, keyed by type name
    pub usage_counts: BTreeMap<String, usize>,

    /// Total evaluations on the audit trail
    pub evaluations: usize,

    /// Evaluations that failed
    pub failed_evaluations: usize,

    /// Distinct citation keys the trail has seen
    pub keys_evaluated: usize,
}

impl EvidenceReport {
    /// Gather a report from the store and the trail
    pub fn gather(store: &EvidenceStore, trail: &AuditTrail) -> Self {
        let usage_counts = store.usage_counts();
        let unclassified = usage_counts
            .get(UsageType::Unknown.as_str())
            .copied()
            .unwrap_or(0);

        let entries = trail.entries();
        let failed = entries
            .iter()
            .filter(|e| e.outcome == LayerOutcome::Fail)
            .count();
        let keys: BTreeSet<&str> = entries.iter().map(|e| e.key.as_str()).collect();

        Self {
            active_citations: store.len(),
            retracted_citations: store.retracted_count(),
            unclassified_citations: unclassified,
            usage_counts,
            evaluations: entries.len(),
            failed_evaluations: failed,
            keys_evaluated: keys.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_domain::{AuditEntry, Citation, Phase, Section, ValidationLayer};

    fn citation(key: &str, usage: UsageType) -> Citation {
        Citation::new(key, "10.1/x", "quote", usage, 100, Phase::Research)
    }

    fn entry(key: &str, outcome: LayerOutcome) -> AuditEntry {
        AuditEntry::new(key, Section::Methods, 1, ValidationLayer::Entry, outcome)
    }

    #[test]
    fn test_usage_counts_exclude_retracted() {
        let store = EvidenceStore::in_memory();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        store.insert(citation("jones2023", UsageType::Tool)).unwrap();
        store.insert(citation("doe2022", UsageType::Dataset)).unwrap();
        store.retract("jones2023", "wrong paper").unwrap();

        let report = EvidenceReport::gather(&store, &AuditTrail::in_memory());
        assert_eq!(report.active_citations, 2);
        assert_eq!(report.retracted_citations, 1);
        assert_eq!(report.usage_counts.get("tool"), Some(&1));
        assert_eq!(report.usage_counts.get("dataset"), Some(&1));
    }

    #[test]
    fn test_unclassified_citations_counted() {
        let store = EvidenceStore::in_memory();
        store.insert(citation("mystery2021", UsageType::Unknown)).unwrap();

        let report = EvidenceReport::gather(&store, &AuditTrail::in_memory());
        assert_eq!(report.unclassified_citations, 1);
    }

    #[test]
    fn test_audit_totals() {
        let trail = AuditTrail::in_memory();
        trail.append(entry("smith2024", LayerOutcome::Pass)).unwrap();
        trail.append(entry("smith2024", LayerOutcome::Fail)).unwrap();
        trail.append(entry("jones2023", LayerOutcome::Pass)).unwrap();

        let report = EvidenceReport::gather(&EvidenceStore::in_memory(), &trail);
        assert_eq!(report.evaluations, 3);
        assert_eq!(report.failed_evaluations, 1);
        assert_eq!(report.keys_evaluated, 2);
    }

    #[test]
    fn test_empty_layers_yield_zero_report() {
        let report = EvidenceReport::gather(&EvidenceStore::in_memory(), &AuditTrail::in_memory());
        assert_eq!(report.active_citations, 0);
        assert_eq!(report.evaluations, 0);
        assert!(report.usage_counts.is_empty());
    }
}
