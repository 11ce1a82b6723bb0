//! Five-level diagnostic walk for a flagged citation

use quill_domain::{LayerOutcome, Remediation, Section, UsageType};
use quill_evidence::{AuditTrail, EvidenceStore};
use quill_validator::SectionRules;
use serde::{Deserialize, Serialize};

/// One diagnostic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLevel {
    /// What was reported, and where
    Symptom,

    /// How the key resolves against the Evidence Store right now
    ImmediateCause,

    /// The key's Audit Trail history
    UsageTrace,

    /// The workflow phase that introduced the citation
    Origin,

    /// The classified root cause and corrective action
    Trigger,
}

impl TraceLevel {
    /// Level number (1-5) for reports
    pub fn number(&self) -> u8 {
        match self {
            TraceLevel::Symptom => 1,
            TraceLevel::ImmediateCause => 2,
            TraceLevel::UsageTrace => 3,
            TraceLevel::Origin => 4,
            TraceLevel::Trigger => 5,
        }
    }

    /// Level name for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Symptom => "symptom",
            TraceLevel::ImmediateCause => "immediate cause",
            TraceLevel::UsageTrace => "usage trace",
            TraceLevel::Origin => "origin",
            TraceLevel::Trigger => "trigger",
        }
    }
}

/// The classified root cause of a flagged citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseKind {
    /// The key was never added to the Evidence Store
    NeverIntroduced,

    /// The citation was retracted after being used
    Retracted,

    /// The citation exists but lacks a persistent identifier
    MissingIdentifier,

    /// The usage type does not fit the section
    MisusedContext,

    /// The usage type was never classified
    UnclassifiedUsage,

    /// The key resolves cleanly; the flag came from an aggregate rule
    Aggregate,
}

impl CauseKind {
    /// The corrective action for this cause
    pub fn remediation(&self) -> Remediation {
        match self {
            CauseKind::NeverIntroduced => Remediation::AddToEvidenceStore,
            CauseKind::Retracted => Remediation::RemoveCitation,
            CauseKind::MissingIdentifier => Remediation::AddToEvidenceStore,
            CauseKind::MisusedContext => Remediation::MoveCitation,
            CauseKind::UnclassifiedUsage => Remediation::ReclassifyUsageType,
            CauseKind::Aggregate => Remediation::RemoveCitation,
        }
    }
}

/// One level of a completed trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Which diagnostic level this is
    pub level: TraceLevel,

    /// What this level found
    pub detail: String,
}

/// A completed five-level trace for one citation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// The citation key traced
    pub key: String,

    /// The section the flag came from
    pub section: Section,

    /// The five levels, in order
    pub steps: Vec<TraceStep>,

    /// The classified root cause
    pub cause: CauseKind,

    /// The corrective action
    pub remediation: Remediation,
}

impl Trace {
    /// Render the trace as a numbered plain-text report
    pub fn report(&self) -> String {
        let mut out = format!("Root-cause trace for [{}] in {}\n", self.key, self.section);
        for step in &self.steps {
            out.push_str(&format!(
                "  {}. {}: {}\n",
                step.level.number(),
                step.level.as_str(),
                step.detail
            ));
        }
        out
    }
}

/// Trace a flagged citation back to its root cause
///
/// Read-only over both the store and the trail. The trace is built from
/// the store's current state, so a retraction that happened after the
/// flag shows up here as the cause.
pub fn trace(key: &str, section: Section, store: &EvidenceStore, trail: &AuditTrail) -> Trace {
    let citation = store.get(key);
    let retraction = store.retraction(key);
    let rules = SectionRules::for_section(section);

    // Level 1: symptom
    let symptom = format!("citation [{}] was flagged during validation of {}", key, section);

    // Level 2: immediate cause, from the store's current state
    let (immediate, cause) = match (&citation, &retraction) {
        (None, Some(reason)) => (
            format!("key resolves as absent: retracted ({})", reason),
            CauseKind::Retracted,
        ),
        (None, None) => (
            "key is absent from the evidence store".to_string(),
            CauseKind::NeverIntroduced,
        ),
        (Some(c), _) if !c.has_identifier() => (
            "key is present but has no persistent identifier".to_string(),
            CauseKind::MissingIdentifier,
        ),
        (Some(c), _) if c.usage == UsageType::Unknown => (
            "key is present but its usage type was never classified".to_string(),
            CauseKind::UnclassifiedUsage,
        ),
        (Some(c), _) if !rules.allows(c.usage) => (
            format!(
                "key is a {} citation; {} does not allow that usage",
                c.usage.as_str(),
                section
            ),
            CauseKind::MisusedContext,
        ),
        (Some(_), _) => (
            "key resolves cleanly with a persistent identifier".to_string(),
            CauseKind::Aggregate,
        ),
    };

    // Level 3: usage trace, from the audit trail
    let history = trail.entries_for(key);
    let usage_trace = if history.is_empty() {
        "no record found in the audit trail".to_string()
    } else {
        let failures = history
            .iter()
            .filter(|e| e.outcome == LayerOutcome::Fail)
            .count();
        let last = &history[history.len() - 1];
        format!(
            "{} evaluation(s) on record, {} failed; last: layer {} in {} at {}",
            history.len(),
            failures,
            last.layer.number(),
            last.section,
            last.timestamp
        )
    };

    // Level 4: origin
    let origin = match &citation {
        Some(c) => format!(
            "introduced during the {} phase at {}",
            c.phase.as_str(),
            c.added_at
        ),
        None if retraction.is_some() => {
            "introduced and later retracted; no active record remains".to_string()
        }
        None => "no record found: the citation was never introduced".to_string(),
    };

    // Level 5: trigger, anchored to the earliest failing evaluation
    let remediation = cause.remediation();
    let first_failure = history.iter().find(|e| e.outcome == LayerOutcome::Fail);
    let trigger = match first_failure {
        Some(e) => format!(
            "first failed at layer {} in {} at {}; fix: {}",
            e.layer.number(),
            e.section,
            e.timestamp,
            remediation.describe()
        ),
        None => format!(
            "no failing evaluation on record; fix: {}",
            remediation.describe()
        ),
    };

    let trace = Trace {
        key: key.to_string(),
        section,
        steps: vec![
            TraceStep {
                level: TraceLevel::Symptom,
                detail: symptom,
            },
            TraceStep {
                level: TraceLevel::ImmediateCause,
                detail: immediate,
            },
            TraceStep {
                level: TraceLevel::UsageTrace,
                detail: usage_trace,
            },
            TraceStep {
                level: TraceLevel::Origin,
                detail: origin,
            },
            TraceStep {
                level: TraceLevel::Trigger,
                detail: trigger,
            },
        ],
        cause,
        remediation,
    };

    tracing::debug!(key, cause = ?trace.cause, "trace complete");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_domain::{AuditEntry, Citation, Phase, ValidationLayer};

    fn citation(key: &str, usage: UsageType) -> Citation {
        Citation::new(key, "10.1/x", "supporting quote", usage, 100, Phase::Research)
    }

    #[test]
    fn test_never_introduced() {
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let trace = trace("ghost2020", Section::Methods, &store, &trail);

        assert_eq!(trace.cause, CauseKind::NeverIntroduced);
        assert_eq!(trace.remediation, Remediation::AddToEvidenceStore);
        assert_eq!(trace.steps.len(), 5);
        assert!(trace.steps[2].detail.contains("no record found"));
        assert!(trace.steps[3].detail.contains("never introduced"));
    }

    #[test]
    fn test_retracted_citation() {
        let store = EvidenceStore::in_memory();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        store.retract("smith2024", "paper withdrawn").unwrap();
        let trail = AuditTrail::in_memory();

        let trace = trace("smith2024", Section::Methods, &store, &trail);

        assert_eq!(trace.cause, CauseKind::Retracted);
        assert_eq!(trace.remediation, Remediation::RemoveCitation);
        assert!(trace.steps[1].detail.contains("paper withdrawn"));
    }

    #[test]
    fn test_misused_context() {
        let store = EvidenceStore::in_memory();
        store
            .insert(citation("wilkinson2016", UsageType::Principle))
            .unwrap();
        let trail = AuditTrail::in_memory();

        let trace = trace("wilkinson2016", Section::Methods, &store, &trail);

        assert_eq!(trace.cause, CauseKind::MisusedContext);
        assert_eq!(trace.remediation, Remediation::MoveCitation);
    }

    #[test]
    fn test_unclassified_usage() {
        let store = EvidenceStore::in_memory();
        store
            .insert(citation("mystery2021", UsageType::Unknown))
            .unwrap();
        let trail = AuditTrail::in_memory();

        let trace = trace("mystery2021", Section::Methods, &store, &trail);

        assert_eq!(trace.cause, CauseKind::UnclassifiedUsage);
        assert_eq!(trace.remediation, Remediation::ReclassifyUsageType);
    }

    #[test]
    fn test_missing_identifier() {
        let store = EvidenceStore::in_memory();
        store
            .insert(Citation::new(
                "smith2024",
                "",
                "quote",
                UsageType::Tool,
                100,
                Phase::Research,
            ))
            .unwrap();
        let trail = AuditTrail::in_memory();

        let trace = trace("smith2024", Section::Methods, &store, &trail);
        assert_eq!(trace.cause, CauseKind::MissingIdentifier);
    }

    #[test]
    fn test_usage_trace_summarizes_history() {
        let store = EvidenceStore::in_memory();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        let trail = AuditTrail::in_memory();
        trail
            .append(AuditEntry::new(
                "smith2024",
                Section::Methods,
                1,
                ValidationLayer::Entry,
                LayerOutcome::Fail,
            ))
            .unwrap();
        trail
            .append(AuditEntry::new(
                "smith2024",
                Section::Methods,
                2,
                ValidationLayer::Entry,
                LayerOutcome::Pass,
            ))
            .unwrap();

        let trace = trace("smith2024", Section::Methods, &store, &trail);
        assert!(trace.steps[2].detail.contains("2 evaluation(s)"));
        assert!(trace.steps[2].detail.contains("1 failed"));
    }

    #[test]
    fn test_clean_key_classifies_as_aggregate() {
        let store = EvidenceStore::in_memory();
        store.insert(citation("smith2024", UsageType::Tool)).unwrap();
        let trail = AuditTrail::in_memory();

        let trace = trace("smith2024", Section::Methods, &store, &trail);
        assert_eq!(trace.cause, CauseKind::Aggregate);
    }

    #[test]
    fn test_report_has_all_levels_in_order() {
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let report = trace("ghost2020", Section::Results, &store, &trail).report();

        let positions: Vec<usize> = ["1. symptom", "2. immediate cause", "3. usage trace", "4. origin", "5. trigger"]
            .iter()
            .map(|needle| report.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
