//! Audit Trail: single-writer, append-only log of citation evaluations

use crate::EvidenceError;
use parking_lot::Mutex;
use quill_domain::AuditEntry;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

struct TrailState {
    entries: Vec<AuditEntry>,
    writer: Option<File>,
}

/// The Audit Trail
///
/// Every validation layer appends one entry per citation examined, pass or
/// fail. Appends are funneled through a single mutex so entries for a
/// given key land in the real-time order their validations occurred, even
/// under concurrent section drafting. The trail is only ever read back for
/// tracing and reporting; it is never rewritten.
pub struct AuditTrail {
    state: Mutex<TrailState>,
}

impl AuditTrail {
    /// Create an in-memory trail with no backing file
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(TrailState {
                entries: Vec::new(),
                writer: None,
            }),
        }
    }

    /// Open (or create) a file-backed trail (one JSON record per line)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EvidenceError> {
        let path = path.as_ref();
        let mut entries = Vec::new();

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                entries.push(serde_json::from_str(&line)?);
            }
        }

        let writer = OpenOptions::new().create(true).append(true).open(path)?;

        tracing::debug!(entries = entries.len(), "audit trail opened");

        Ok(Self {
            state: Mutex::new(TrailState {
                entries,
                writer: Some(writer),
            }),
        })
    }

    /// Append one entry
    ///
    /// Durability is best-effort: callers log a failed append and carry
    /// on, since the audit trail must never flip a validation verdict.
    pub fn append(&self, entry: AuditEntry) -> Result<(), EvidenceError> {
        let mut state = self.state.lock();
        if let Some(writer) = state.writer.as_mut() {
            let line = serde_json::to_string(&entry)?;
            writeln!(writer, "{}", line)?;
        }
        state.entries.push(entry);
        Ok(())
    }

    /// Snapshot of every entry, in append order
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.state.lock().entries.clone()
    }

    /// All entries involving a key, in append (= real-time) order
    pub fn entries_for(&self, key: &str) -> Vec<AuditEntry> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|e| e.key == key)
            .cloned()
            .collect()
    }

    /// Number of entries involving a key
    pub fn count_for(&self, key: &str) -> usize {
        self.state.lock().entries.iter().filter(|e| e.key == key).count()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether the trail holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_domain::{LayerOutcome, Section, ValidationLayer};

    fn entry(key: &str, ts: u64, outcome: LayerOutcome) -> AuditEntry {
        AuditEntry::new(key, Section::Methods, ts, ValidationLayer::Entry, outcome)
    }

    #[test]
    fn test_append_preserves_order() {
        let trail = AuditTrail::in_memory();
        trail.append(entry("smith2024", 1, LayerOutcome::Pass)).unwrap();
        trail.append(entry("jones2023", 2, LayerOutcome::Fail)).unwrap();
        trail.append(entry("smith2024", 3, LayerOutcome::Pass)).unwrap();

        let entries = trail.entries_for("smith2024");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, 1);
        assert_eq!(entries[1].timestamp, 3);
    }

    #[test]
    fn test_count_for_missing_key() {
        let trail = AuditTrail::in_memory();
        assert_eq!(trail.count_for("ghost2020"), 0);
    }
}
