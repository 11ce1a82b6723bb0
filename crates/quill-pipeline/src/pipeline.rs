//! Phase coordination over the integrity-control components

use crate::PipelineError;
use quill_domain::{Citation, Manuscript, ReviewKind, Section, SectionDocument, Verdict};
use quill_evidence::{AuditTrail, EvidenceReport, EvidenceStore};
use quill_ledger::{Ledger, LedgerState};
use quill_scheduler::{DependencyTable, Scheduler, SectionDrafter, TaskOutcome, TaskStatus};
use quill_tracer::Trace;
use quill_validator::{assemble, extract, ValidationConfig, Validator};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The phase coordinator
///
/// Holds every integrity-control component and keeps accepted section
/// drafts in memory until assembly. Acceptance is the ledger's call: a
/// drafted section is retained only after the completion gate admits its
/// verdict.
pub struct Pipeline {
    store: EvidenceStore,
    trail: AuditTrail,
    ledger: Ledger,
    validator: Validator,
    scheduler: Scheduler,
    accepted: BTreeMap<Section, SectionDocument>,
}

impl Pipeline {
    /// Wire a pipeline from its storage layers and validation config
    pub fn new(
        store: EvidenceStore,
        trail: AuditTrail,
        ledger: Ledger,
        config: ValidationConfig,
        max_concurrent: usize,
    ) -> Result<Self, PipelineError> {
        let scheduler = Scheduler::new(
            DependencyTable::standard(),
            Validator::new(config.clone()),
            max_concurrent,
        )?;
        Ok(Self {
            store,
            trail,
            ledger,
            validator: Validator::new(config),
            scheduler,
            accepted: BTreeMap::new(),
        })
    }

    /// Research phase: append candidate citations to the Evidence Store
    ///
    /// Keys already present are skipped with a warning; everything else
    /// is inserted. Returns the number of citations actually added.
    pub fn research_intake(&self, citations: Vec<Citation>) -> Result<usize, PipelineError> {
        let mut added = 0;
        for citation in citations {
            match self.store.insert(citation) {
                Ok(()) => added += 1,
                Err(quill_evidence::EvidenceError::KeyExists(key)) => {
                    tracing::warn!(key, "citation already evidenced, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!(added, "research intake complete");
        Ok(added)
    }

    /// Draft phase: dispatch the scheduler and record passing sections
    ///
    /// Sections the ledger already accepted satisfy dependencies and are
    /// not re-drafted. A drafted section enters the ledger (and the
    /// in-memory accepted set) only if its post-run verdict passed.
    pub async fn draft(
        &mut self,
        sections: &[Section],
        drafter: Arc<dyn SectionDrafter>,
    ) -> Result<BTreeMap<Section, TaskOutcome>, PipelineError> {
        let completed = self.ledger.current_state().completed;
        let todo: Vec<Section> = sections
            .iter()
            .copied()
            .filter(|s| !completed.contains(s))
            .collect();

        let outcomes = self
            .scheduler
            .dispatch(&todo, &completed, drafter, &self.store, &self.trail)
            .await;

        for (&section, outcome) in &outcomes {
            if outcome.status != TaskStatus::Completed {
                continue;
            }
            let (Some(doc), Some(verdict)) = (&outcome.document, &outcome.verdict) else {
                continue;
            };
            if verdict.passed() {
                self.ledger.record_section_complete(section, verdict)?;
                self.accepted.insert(section, doc.clone());
            } else {
                tracing::warn!(
                    section = section.as_str(),
                    result = verdict.summary(),
                    "drafted section failed validation, not recorded"
                );
            }
        }
        Ok(outcomes)
    }

    /// Assembly phase: combine accepted sections and validate the whole
    ///
    /// Runs the manuscript-wide layers over the combined text and records
    /// assembly completion when the verdict passes. The manuscript and
    /// verdict come back either way.
    pub fn assemble_manuscript(
        &mut self,
        bibliography: Vec<String>,
    ) -> Result<(Manuscript, Verdict), PipelineError> {
        if self.accepted.is_empty() {
            return Err(PipelineError::NothingToAssemble);
        }
        let sections: Vec<SectionDocument> = self.accepted.values().cloned().collect();
        let manuscript = assemble(sections, bibliography);
        let verdict = self
            .validator
            .validate_manuscript(&manuscript, &self.store, &self.trail);
        if verdict.passed() {
            self.ledger.record_assembly_complete(&verdict)?;
        }
        Ok((manuscript, verdict))
    }

    /// Re-admit previously accepted drafts, e.g. reloaded from disk
    ///
    /// Only sections the ledger has on record are taken back; anything
    /// else never passed the gate and is ignored.
    pub fn restore_accepted(&mut self, docs: Vec<SectionDocument>) {
        for doc in docs {
            if self.ledger.is_complete(doc.section) {
                self.accepted.insert(doc.section, doc);
            } else {
                tracing::warn!(
                    section = doc.section.as_str(),
                    "draft has no completion on record, ignoring"
                );
            }
        }
    }

    /// Review phase: record an iteration under the next version number
    pub fn record_review(
        &mut self,
        kind: ReviewKind,
        verdict: &Verdict,
    ) -> Result<u32, PipelineError> {
        let version = self.ledger.next_version(kind);
        self.ledger.record_review_iteration(kind, verdict, version)?;
        Ok(version)
    }

    /// Validate a section body without drafting it
    pub fn validate_text(&self, section: Section, body: &str) -> Verdict {
        let doc = extract::section_document(section, body);
        self.validator.validate_section(&doc, &self.store, &self.trail)
    }

    /// Explain a flagged citation
    pub fn trace(&self, key: &str, section: Section) -> Trace {
        quill_tracer::trace(key, section, &self.store, &self.trail)
    }

    /// Snapshot of ledger state for status reporting
    pub fn status(&self) -> LedgerState {
        self.ledger.current_state()
    }

    /// Aggregate evidence and audit statistics for reporting
    pub fn evidence_report(&self) -> EvidenceReport {
        EvidenceReport::gather(&self.store, &self.trail)
    }

    /// The Evidence Store
    pub fn store(&self) -> &EvidenceStore {
        &self.store
    }

    /// The Audit Trail
    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }

    /// The Workflow State Ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
