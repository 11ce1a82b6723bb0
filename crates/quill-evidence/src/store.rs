//! Evidence Store: append-only mapping from citation key to metadata

use crate::EvidenceError;
use parking_lot::RwLock;
use quill_domain::{Citation, Phase, UsageType};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

const HEADER: &str = "key\tdoi\tusage\tadded_at\tphase\tquote";

struct StoreState {
    citations: BTreeMap<String, Citation>,
    retracted: BTreeMap<String, String>,
    writer: Option<File>,
}

/// The Evidence Store
///
/// Every key referenced anywhere in manuscript text must exist here before
/// that text is accepted (the Layer 1 invariant). The store grows
/// monotonically: citations are inserted, optionally quote-amended, and
/// removed only via an explicit retraction record. The persisted file is
/// strictly append-only; amendments and retractions are replayed on load.
///
/// Reads take a shared lock; inserts and amendments go through the write
/// lock, which doubles as the single-writer gate for the backing file.
pub struct EvidenceStore {
    state: RwLock<StoreState>,
}

impl EvidenceStore {
    /// Create an in-memory store with no backing file
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState {
                citations: BTreeMap::new(),
                retracted: BTreeMap::new(),
                writer: None,
            }),
        }
    }

    /// Open (or create) a file-backed store
    ///
    /// Existing rows are replayed in order: inserts, amendments (a later
    /// row for the same key supersedes the earlier one), then retractions.
    ///
    /// # Errors
    ///
    /// Returns `EvidenceError::Malformed` if a persisted row cannot be
    /// parsed, or an I/O error if the file cannot be read or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EvidenceError> {
        let path = path.as_ref();
        let mut citations = BTreeMap::new();
        let mut retracted = BTreeMap::new();

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            for (idx, line) in reader.lines().enumerate() {
                let line = line?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == HEADER {
                    continue;
                }
                if let Some(rest) = trimmed.strip_prefix('!') {
                    let key = rest.split('\t').next().unwrap_or(rest).to_string();
                    let reason = rest
                        .split('\t')
                        .nth(1)
                        .unwrap_or("retracted")
                        .to_string();
                    retracted.insert(key, reason);
                    continue;
                }
                let citation = parse_row(trimmed, idx + 1)?;
                // Later rows supersede earlier ones, retractions included:
                // an insert row after a retraction row revives the key
                retracted.remove(&citation.key);
                citations.insert(citation.key.clone(), citation);
            }
        }

        let is_new = !path.exists();
        let mut writer = OpenOptions::new().create(true).append(true).open(path)?;
        if is_new {
            writeln!(writer, "{}", HEADER)?;
        }

        tracing::debug!(
            citations = citations.len(),
            retracted = retracted.len(),
            "evidence store opened"
        );

        Ok(Self {
            state: RwLock::new(StoreState {
                citations,
                retracted,
                writer: Some(writer),
            }),
        })
    }

    /// Insert a new citation
    ///
    /// # Errors
    ///
    /// Returns `EvidenceError::KeyExists` if the key is already present
    /// and not retracted. Re-inserting a retracted key is allowed: the
    /// new insert supersedes the retraction.
    pub fn insert(&self, citation: Citation) -> Result<(), EvidenceError> {
        let mut state = self.state.write();
        if state.citations.contains_key(&citation.key) && !state.retracted.contains_key(&citation.key)
        {
            return Err(EvidenceError::KeyExists(citation.key));
        }
        state.retracted.remove(&citation.key);
        if let Some(writer) = state.writer.as_mut() {
            writeln!(writer, "{}", format_row(&citation))?;
        }
        state.citations.insert(citation.key.clone(), citation);
        Ok(())
    }

    /// Amend the supporting quote of an existing citation
    ///
    /// The only permitted mutation. Appends a superseding row to the
    /// backing file.
    pub fn amend_quote(&self, key: &str, quote: &str) -> Result<(), EvidenceError> {
        let mut state = self.state.write();
        if state.retracted.contains_key(key) || !state.citations.contains_key(key) {
            return Err(EvidenceError::KeyNotFound(key.to_string()));
        }
        let mut amended = state.citations[key].clone();
        amended.quote = quote.to_string();
        if let Some(writer) = state.writer.as_mut() {
            writeln!(writer, "{}", format_row(&amended))?;
        }
        state.citations.insert(key.to_string(), amended);
        Ok(())
    }

    /// Retract a citation with an explicit reason
    ///
    /// The citation remains in the file's history but resolves as absent
    /// from then on.
    pub fn retract(&self, key: &str, reason: &str) -> Result<(), EvidenceError> {
        let mut state = self.state.write();
        if !state.citations.contains_key(key) || state.retracted.contains_key(key) {
            return Err(EvidenceError::KeyNotFound(key.to_string()));
        }
        if let Some(writer) = state.writer.as_mut() {
            writeln!(writer, "!{}\t{}", key, sanitize(reason))?;
        }
        state.retracted.insert(key.to_string(), reason.to_string());
        Ok(())
    }

    /// Look up a citation by key
    ///
    /// Retracted keys resolve as absent.
    pub fn get(&self, key: &str) -> Option<Citation> {
        let state = self.state.read();
        if state.retracted.contains_key(key) {
            return None;
        }
        state.citations.get(key).cloned()
    }

    /// The retraction reason for a key, if it was retracted
    pub fn retraction(&self, key: &str) -> Option<String> {
        self.state.read().retracted.get(key).cloned()
    }

    /// Whether the key is present and not retracted
    pub fn contains(&self, key: &str) -> bool {
        let state = self.state.read();
        state.citations.contains_key(key) && !state.retracted.contains_key(key)
    }

    /// All active (non-retracted) keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let state = self.state.read();
        state
            .citations
            .keys()
            .filter(|k| !state.retracted.contains_key(*k))
            .cloned()
            .collect()
    }

    /// Active citations per usage type, keyed by type name
    pub fn usage_counts(&self) -> BTreeMap<String, usize> {
        let state = self.state.read();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for (key, citation) in &state.citations {
            if !state.retracted.contains_key(key) {
                *counts.entry(citation.usage.as_str().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Number of retracted keys
    pub fn retracted_count(&self) -> usize {
        self.state.read().retracted.len()
    }

    /// Number of active citations
    pub fn len(&self) -> usize {
        let state = self.state.read();
        state
            .citations
            .keys()
            .filter(|k| !state.retracted.contains_key(*k))
            .count()
    }

    /// Whether the store holds no active citations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tabs and newlines are field/record separators; strip them from values
fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn format_row(citation: &Citation) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        sanitize(&citation.key),
        sanitize(&citation.doi),
        citation.usage.as_str(),
        citation.added_at,
        citation.phase.as_str(),
        sanitize(&citation.quote),
    )
}

fn parse_row(row: &str, line: usize) -> Result<Citation, EvidenceError> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() != 6 {
        return Err(EvidenceError::Malformed {
            line,
            reason: format!("expected 6 fields, found {}", fields.len()),
        });
    }
    let usage = UsageType::parse(fields[2]).ok_or_else(|| EvidenceError::Malformed {
        line,
        reason: format!("unknown usage type '{}'", fields[2]),
    })?;
    let added_at = fields[3].parse::<u64>().map_err(|_| EvidenceError::Malformed {
        line,
        reason: format!("invalid timestamp '{}'", fields[3]),
    })?;
    let phase = Phase::parse(fields[4]).ok_or_else(|| EvidenceError::Malformed {
        line,
        reason: format!("unknown phase '{}'", fields[4]),
    })?;
    Ok(Citation::new(
        fields[0], fields[1], fields[5], usage, added_at, phase,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_citation(key: &str) -> Citation {
        Citation::new(
            key,
            "10.1/x",
            "We present a tool",
            UsageType::Tool,
            100,
            Phase::Research,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = EvidenceStore::in_memory();
        store.insert(tool_citation("smith2024")).unwrap();

        let fetched = store.get("smith2024").unwrap();
        assert_eq!(fetched.doi, "10.1/x");
        assert_eq!(fetched.usage, UsageType::Tool);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let store = EvidenceStore::in_memory();
        store.insert(tool_citation("smith2024")).unwrap();

        let err = store.insert(tool_citation("smith2024")).unwrap_err();
        assert!(matches!(err, EvidenceError::KeyExists(k) if k == "smith2024"));
    }

    #[test]
    fn test_retracted_key_resolves_absent() {
        let store = EvidenceStore::in_memory();
        store.insert(tool_citation("smith2024")).unwrap();
        store.retract("smith2024", "paper withdrawn").unwrap();

        assert!(store.get("smith2024").is_none());
        assert!(!store.contains("smith2024"));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_reinsert_after_retraction() {
        let store = EvidenceStore::in_memory();
        store.insert(tool_citation("smith2024")).unwrap();
        store.retract("smith2024", "wrong paper").unwrap();
        store.insert(tool_citation("smith2024")).unwrap();

        assert!(store.contains("smith2024"));
    }

    #[test]
    fn test_amend_quote() {
        let store = EvidenceStore::in_memory();
        store.insert(tool_citation("smith2024")).unwrap();
        store.amend_quote("smith2024", "A better quote").unwrap();

        assert_eq!(store.get("smith2024").unwrap().quote, "A better quote");
    }

    #[test]
    fn test_amend_missing_key() {
        let store = EvidenceStore::in_memory();
        let err = store.amend_quote("ghost2020", "quote").unwrap_err();
        assert!(matches!(err, EvidenceError::KeyNotFound(_)));
    }

    #[test]
    fn test_sanitize_strips_separators() {
        assert_eq!(sanitize("a\tb\nc"), "a b c");
    }
}
