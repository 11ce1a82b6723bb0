//! The four-layer validation pipeline

use crate::{extract, SectionRules, ValidationConfig};
use quill_domain::{
    AuditEntry, Finding, FindingKind, LayerOutcome, Manuscript, Remediation, Section,
    SectionDocument, ValidationLayer, Verdict,
};
use quill_evidence::{now_millis, AuditTrail, EvidenceStore};

/// The citation validator
///
/// Stateless apart from its configuration: every call reads the Evidence
/// Store afresh and produces a new `Verdict`. Identical inputs against an
/// identical store yield identical verdicts.
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one drafted section (Layers 1 and 2, plus length)
    ///
    /// Layer 1 failures are always errors. Layer 2 findings are warnings
    /// unless `strict_mode` promotes them. Every citation examined gets an
    /// audit entry per layer, pass or fail; a failed audit append is
    /// logged and swallowed because the trail must never flip a verdict.
    pub fn validate_section(
        &self,
        doc: &SectionDocument,
        store: &EvidenceStore,
        trail: &AuditTrail,
    ) -> Verdict {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut layer2 = Vec::new();
        let rules = SectionRules::for_section(doc.section);

        // One audit entry per key per call: the entry's layer is the
        // deepest layer that judged the key
        for key in &doc.citations {
            // Layer 1: the key must resolve with a persistent identifier
            let citation = store.get(key).filter(|c| c.has_identifier());
            let Some(citation) = citation else {
                record(trail, key, doc.section, ValidationLayer::Entry, LayerOutcome::Fail);
                errors.push(Finding::new(
                    FindingKind::UnverifiedCitation { key: key.clone() },
                    format!("citation [{}] not in evidence store", key),
                    Remediation::AddToEvidenceStore,
                ));
                continue;
            };

            // Layer 2: usage type must fit the section
            let fits = rules.allows(citation.usage);
            let outcome = if fits {
                LayerOutcome::Pass
            } else {
                LayerOutcome::Fail
            };
            record(trail, key, doc.section, ValidationLayer::Business, outcome);

            if !fits {
                layer2.push(Finding::new(
                    FindingKind::InappropriateCitationContext {
                        key: key.clone(),
                        usage: citation.usage,
                        section: doc.section,
                    },
                    format!(
                        "[{}] is a {} citation; {} does not allow that usage",
                        key,
                        citation.usage.as_str(),
                        doc.section.as_str()
                    ),
                    Remediation::MoveCitation,
                ));
            }
        }

        // Layer 2: per-section citation ceiling
        if doc.citations.len() > rules.ceiling {
            layer2.push(Finding::new(
                FindingKind::CitationCeilingExceeded {
                    section: doc.section,
                    count: doc.citations.len(),
                    ceiling: rules.ceiling,
                },
                format!(
                    "{} cites {} works, ceiling is {}",
                    doc.section.as_str(),
                    doc.citations.len(),
                    rules.ceiling
                ),
                Remediation::RemoveCitation,
            ));
        }

        if self.config.strict_mode {
            errors.append(&mut layer2);
        } else {
            warnings.append(&mut layer2);
        }

        if self.config.check_word_count {
            let (min, max) = doc.section.word_range();
            let kind = FindingKind::WordCountOutOfRange {
                section: doc.section,
                words: doc.word_count,
                min,
                max,
            };
            if doc.word_count < min {
                // Too short means missing substance; journals reject over
                // length, so running long stays advisory
                errors.push(Finding::new(
                    kind,
                    format!(
                        "{} has {} words, below the {}-{} range",
                        doc.section.as_str(),
                        doc.word_count,
                        min,
                        max
                    ),
                    Remediation::AdjustLength,
                ));
            } else if doc.word_count > max {
                warnings.push(Finding::new(
                    kind,
                    format!(
                        "{} has {} words, above the {}-{} range",
                        doc.section.as_str(),
                        doc.word_count,
                        min,
                        max
                    ),
                    Remediation::AdjustLength,
                ));
            }
        }

        let info = vec![
            format!("word count: {}", doc.word_count),
            format!("citations: {}", doc.citations.len()),
        ];

        let verdict = Verdict::from_findings(errors, warnings, info);
        tracing::debug!(
            section = doc.section.as_str(),
            result = verdict.summary(),
            "section validated"
        );
        verdict
    }

    /// Validate the assembled manuscript (Layers 1 and 3)
    ///
    /// Re-runs the Layer 1 check across every citation (the store may have
    /// changed since sections were drafted), then reconciles text against
    /// bibliography in both directions and enforces aggregate limits.
    pub fn validate_manuscript(
        &self,
        manuscript: &Manuscript,
        store: &EvidenceStore,
        trail: &AuditTrail,
    ) -> Verdict {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let cited = manuscript.citations();

        // Layer 3: text and bibliography must agree in both directions
        let missing_from_bibliography: Vec<String> = cited
            .iter()
            .filter(|k| !manuscript.bibliography.contains(k))
            .cloned()
            .collect();
        let missing_from_text: Vec<String> = manuscript
            .bibliography
            .iter()
            .filter(|k| !cited.contains(k))
            .cloned()
            .collect();

        // One audit entry per key per call, as in section validation
        for key in &cited {
            let section = manuscript.section_of(key).unwrap_or(Section::Abstract);
            let verified = store.get(key).is_some_and(|c| c.has_identifier());
            if !verified {
                record(trail, key, section, ValidationLayer::Entry, LayerOutcome::Fail);
                errors.push(Finding::new(
                    FindingKind::UnverifiedCitation { key: key.clone() },
                    format!("citation [{}] not in evidence store", key),
                    Remediation::AddToEvidenceStore,
                ));
                continue;
            }
            let outcome = if missing_from_bibliography.contains(key) {
                LayerOutcome::Fail
            } else {
                LayerOutcome::Pass
            };
            record(trail, key, section, ValidationLayer::Assembly, outcome);
        }

        for key in &missing_from_bibliography {
            errors.push(Finding::new(
                FindingKind::OrphanedReference {
                    key: key.clone(),
                    found_in: "text".to_string(),
                },
                format!("[{}] is cited but has no bibliography entry", key),
                Remediation::ReconcileBibliography,
            ));
        }
        for key in &missing_from_text {
            errors.push(Finding::new(
                FindingKind::OrphanedReference {
                    key: key.clone(),
                    found_in: "bibliography".to_string(),
                },
                format!("bibliography entry [{}] is never cited", key),
                Remediation::ReconcileBibliography,
            ));
        }
        if !missing_from_bibliography.is_empty() && !missing_from_text.is_empty() {
            errors.push(Finding::new(
                FindingKind::BibliographyDesync {
                    missing_from_bibliography: missing_from_bibliography.clone(),
                    missing_from_text: missing_from_text.clone(),
                },
                "text citations and bibliography have diverged in both directions",
                Remediation::ReconcileBibliography,
            ));
        }

        // Layer 3: aggregate limits
        if cited.len() > self.config.max_total_citations {
            errors.push(Finding::new(
                FindingKind::AggregateLimitExceeded {
                    what: "citations".to_string(),
                    count: cited.len(),
                    limit: self.config.max_total_citations,
                },
                format!(
                    "manuscript cites {} works, limit is {}",
                    cited.len(),
                    self.config.max_total_citations
                ),
                Remediation::RemoveCitation,
            ));
        }
        if manuscript.table_count > self.config.max_tables {
            errors.push(Finding::new(
                FindingKind::AggregateLimitExceeded {
                    what: "tables".to_string(),
                    count: manuscript.table_count,
                    limit: self.config.max_tables,
                },
                format!(
                    "manuscript has {} tables, limit is {}",
                    manuscript.table_count, self.config.max_tables
                ),
                Remediation::RemoveCitation,
            ));
        }

        let info = vec![
            format!("word count: {}", manuscript.word_count()),
            format!("citations: {}", cited.len()),
            format!("tables: {}", manuscript.table_count),
        ];

        let verdict = Verdict::from_findings(errors, warnings, info);
        tracing::debug!(result = verdict.summary(), "manuscript validated");
        verdict
    }
}

/// Append one audit entry; log and carry on if the append fails
fn record(
    trail: &AuditTrail,
    key: &str,
    section: Section,
    layer: ValidationLayer,
    outcome: LayerOutcome,
) {
    let entry = AuditEntry::new(key, section, now_millis(), layer, outcome);
    if let Err(e) = trail.append(entry) {
        tracing::warn!(key, layer = layer.number(), error = %e, "audit append failed");
    }
}

/// Assemble a manuscript from accepted sections and a bibliography
///
/// Sections are concatenated in declaration order with a title header
/// each; extraction facts (tables) are recomputed over the combined body.
pub fn assemble(sections: Vec<SectionDocument>, bibliography: Vec<String>) -> Manuscript {
    let mut ordered = sections;
    ordered.sort_by_key(|s| s.section);
    let body = ordered
        .iter()
        .map(|s| {
            let mut title: Vec<char> = s.section.as_str().chars().collect();
            title[0] = title[0].to_ascii_uppercase();
            let title: String = title.into_iter().collect();
            format!("## {}\n\n{}\n", title, s.body.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n");
    let table_count = extract::table_count(&body);
    Manuscript {
        sections: ordered,
        body,
        bibliography,
        table_count,
    }
}
