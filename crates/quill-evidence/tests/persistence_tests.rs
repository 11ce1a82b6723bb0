//! Integration tests for file-backed evidence persistence

use quill_domain::{AuditEntry, Citation, LayerOutcome, Phase, Section, UsageType, ValidationLayer};
use quill_evidence::{AuditTrail, EvidenceStore};
use tempfile::tempdir;

fn citation(key: &str, usage: UsageType) -> Citation {
    Citation::new(
        key,
        format!("10.1234/{}", key),
        "Supporting quote",
        usage,
        1_700_000_000_000,
        Phase::Research,
    )
}

#[test]
fn store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("literature_evidence.tsv");

    {
        let store = EvidenceStore::open(&path).unwrap();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        store.insert(citation("jones2023", UsageType::Dataset)).unwrap();
        store.amend_quote("smith2024", "Amended quote").unwrap();
    }

    let reopened = EvidenceStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get("smith2024").unwrap().quote, "Amended quote");
    assert_eq!(reopened.get("jones2023").unwrap().usage, UsageType::Dataset);
}

#[test]
fn retraction_replays_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("literature_evidence.tsv");

    {
        let store = EvidenceStore::open(&path).unwrap();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        store.retract("smith2024", "wrong paper").unwrap();
    }

    let reopened = EvidenceStore::open(&path).unwrap();
    assert!(reopened.get("smith2024").is_none());
    assert!(reopened.is_empty());

    // The file keeps the full history: insert row plus retraction row
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("smith2024\t10.1234/smith2024"));
    assert!(raw.contains("!smith2024\twrong paper"));
}

#[test]
fn reinsert_after_retraction_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("literature_evidence.tsv");

    {
        let store = EvidenceStore::open(&path).unwrap();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        store.retract("smith2024", "superseded").unwrap();
        store.insert(citation("smith2024", UsageType::Seminal)).unwrap();
    }

    let reopened = EvidenceStore::open(&path).unwrap();
    let fetched = reopened.get("smith2024").unwrap();
    assert_eq!(fetched.usage, UsageType::Seminal);
    // The replayed insert supersedes the retraction row entirely
    assert!(reopened.retraction("smith2024").is_none());
    assert_eq!(reopened.len(), 1);
}

#[test]
fn audit_trail_survives_reopen_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("citation_audit.jsonl");

    {
        let trail = AuditTrail::open(&path).unwrap();
        for ts in 1..=3 {
            trail
                .append(AuditEntry::new(
                    "smith2024",
                    Section::Methods,
                    ts,
                    ValidationLayer::Entry,
                    if ts == 2 { LayerOutcome::Fail } else { LayerOutcome::Pass },
                ))
                .unwrap();
        }
    }

    let reopened = AuditTrail::open(&path).unwrap();
    let entries = reopened.entries_for("smith2024");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].timestamp, 1);
    assert_eq!(entries[1].outcome, LayerOutcome::Fail);
    assert_eq!(entries[2].timestamp, 3);
}
