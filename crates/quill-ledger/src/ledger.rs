//! The append-only ledger and its derived snapshot

use crate::LedgerError;
use quill_domain::{ReviewKind, Section, Verdict};
use quill_evidence::now_millis;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum LedgerEntry {
    /// A section passed validation and was accepted
    SectionCompleted {
        /// The completed section
        section: Section,
        /// When the completion was recorded (milliseconds since epoch)
        at: u64,
        /// One-line summary of the passing verdict
        verdict: String,
    },

    /// The assembled manuscript passed validation
    AssemblyCompleted {
        /// When the completion was recorded
        at: u64,
        /// One-line summary of the passing verdict
        verdict: String,
    },

    /// A review iteration was recorded
    ReviewRecorded {
        /// Kind of review
        kind: ReviewKind,
        /// Version number, strictly increasing per kind
        version: u32,
        /// When the review was recorded
        at: u64,
        /// One-line summary of the review's verdict (pass or fail)
        verdict: String,
    },
}

/// Read-only snapshot derived from the entry history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Sections accepted so far
    pub completed: BTreeSet<Section>,

    /// Whether assembly has been accepted
    pub assembled: bool,

    /// Highest recorded review version per kind
    pub versions: BTreeMap<ReviewKind, u32>,
}

#[derive(Serialize, Deserialize, Default)]
struct LedgerFile {
    entries: Vec<LedgerEntry>,
}

/// The Workflow State Ledger
///
/// Completion is gated: only a passing verdict gets a section (or the
/// assembly) into the ledger. Recording the same section again is allowed
/// and appends a superseding entry, which is what makes phase completion
/// idempotent. The entry list only ever grows.
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    path: Option<PathBuf>,
}

impl Ledger {
    /// Create an in-memory ledger with no backing file
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    /// Load a file-backed ledger, starting empty if the file is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let entries = if path.exists() {
            let raw = fs::read_to_string(path)?;
            let file: LedgerFile = serde_json::from_str(&raw)?;
            file.entries
        } else {
            Vec::new()
        };

        tracing::debug!(entries = entries.len(), "ledger loaded");

        Ok(Self {
            entries,
            path: Some(path.to_path_buf()),
        })
    }

    /// Record a section completion
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::VerificationGateViolation` if the verdict
    /// failed. The gate is the only way sections enter the ledger.
    pub fn record_section_complete(
        &mut self,
        section: Section,
        verdict: &Verdict,
    ) -> Result<(), LedgerError> {
        if !verdict.passed() {
            return Err(LedgerError::VerificationGateViolation {
                section,
                summary: verdict.summary(),
            });
        }
        self.append(LedgerEntry::SectionCompleted {
            section,
            at: now_millis(),
            verdict: verdict.summary(),
        })?;
        tracing::info!(section = section.as_str(), "section completion recorded");
        Ok(())
    }

    /// Record assembly completion, gated like section completions
    pub fn record_assembly_complete(&mut self, verdict: &Verdict) -> Result<(), LedgerError> {
        if !verdict.passed() {
            return Err(LedgerError::AssemblyGateViolation {
                summary: verdict.summary(),
            });
        }
        self.append(LedgerEntry::AssemblyCompleted {
            at: now_millis(),
            verdict: verdict.summary(),
        })?;
        tracing::info!("assembly completion recorded");
        Ok(())
    }

    /// Record a review iteration
    ///
    /// Reviews are recorded pass or fail; only the version is policed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::VersionNotMonotonic` unless `version` is
    /// strictly above every version already recorded for `kind`.
    pub fn record_review_iteration(
        &mut self,
        kind: ReviewKind,
        verdict: &Verdict,
        version: u32,
    ) -> Result<(), LedgerError> {
        let highest = self.highest_version(kind);
        if version <= highest {
            return Err(LedgerError::VersionNotMonotonic {
                kind,
                version,
                highest,
            });
        }
        self.append(LedgerEntry::ReviewRecorded {
            kind,
            version,
            at: now_millis(),
            verdict: verdict.summary(),
        })?;
        tracing::info!(kind = kind.as_str(), version, "review iteration recorded");
        Ok(())
    }

    /// The next unused review version for a kind
    pub fn next_version(&self, kind: ReviewKind) -> u32 {
        self.highest_version(kind) + 1
    }

    /// Whether a section's completion is on record
    pub fn is_complete(&self, section: Section) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, LedgerEntry::SectionCompleted { section: s, .. } if *s == section))
    }

    /// Derive the current snapshot from the full entry history
    pub fn current_state(&self) -> LedgerState {
        let mut completed = BTreeSet::new();
        let mut assembled = false;
        let mut versions: BTreeMap<ReviewKind, u32> = BTreeMap::new();
        for entry in &self.entries {
            match entry {
                LedgerEntry::SectionCompleted { section, .. } => {
                    completed.insert(*section);
                }
                LedgerEntry::AssemblyCompleted { .. } => assembled = true,
                LedgerEntry::ReviewRecorded { kind, version, .. } => {
                    let highest = versions.entry(*kind).or_insert(0);
                    *highest = (*highest).max(*version);
                }
            }
        }
        LedgerState {
            completed,
            assembled,
            versions,
        }
    }

    /// The full entry history, oldest first
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    fn highest_version(&self, kind: ReviewKind) -> u32 {
        self.entries
            .iter()
            .filter_map(|e| match e {
                LedgerEntry::ReviewRecorded { kind: k, version, .. } if *k == kind => {
                    Some(*version)
                }
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn append(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        self.entries.push(entry);
        if let Some(path) = &self.path {
            let file = LedgerFile {
                entries: self.entries.clone(),
            };
            fs::write(path, serde_json::to_string_pretty(&file)?)?;
        }
        Ok(())
    }
}
