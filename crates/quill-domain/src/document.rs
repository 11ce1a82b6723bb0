//! Document module - drafted sections and the assembled manuscript

use crate::Section;
use serde::{Deserialize, Serialize};

/// Validation state of a drafted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// Not yet validated
    Unvalidated,

    /// Last validation passed
    Passed,

    /// Last validation failed
    Failed,
}

/// One drafted manuscript section
///
/// Re-drafting supersedes the previous draft rather than deleting it;
/// the Workflow State Ledger tracks only the latest accepted version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDocument {
    /// Which section this is
    pub section: Section,

    /// Markdown body text
    pub body: String,

    /// Citation keys referenced in the body, in order of first appearance
    pub citations: Vec<String>,

    /// Word count with markdown syntax stripped
    pub word_count: usize,

    /// Validation state of this draft
    pub state: DocumentState,
}

impl SectionDocument {
    /// Create a section document from pre-extracted facts
    ///
    /// Citation extraction and word counting live in the validator crate;
    /// this constructor only records their results.
    pub fn new(
        section: Section,
        body: impl Into<String>,
        citations: Vec<String>,
        word_count: usize,
    ) -> Self {
        Self {
            section,
            body: body.into(),
            citations,
            word_count,
            state: DocumentState::Unvalidated,
        }
    }

    /// Record the outcome of a validation pass
    pub fn mark(&mut self, passed: bool) {
        self.state = if passed {
            DocumentState::Passed
        } else {
            DocumentState::Failed
        };
    }
}

/// The assembled manuscript: all accepted sections combined
///
/// Sections are kept (in assembly order) rather than flattened so that
/// manuscript-wide validation can still attribute each citation to the
/// section that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
    /// The combined sections, in assembly order
    pub sections: Vec<SectionDocument>,

    /// Combined markdown body
    pub body: String,

    /// Bibliography entry keys, as supplied by the literature collaborator
    pub bibliography: Vec<String>,

    /// Number of markdown tables in the body
    pub table_count: usize,
}

impl Manuscript {
    /// Total word count across sections
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(|s| s.word_count).sum()
    }

    /// Citation keys referenced anywhere, in first-appearance order
    pub fn citations(&self) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        let mut keys = Vec::new();
        for section in &self.sections {
            for key in &section.citations {
                if seen.insert(key.clone()) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    /// The section in which a citation key first appears
    pub fn section_of(&self, key: &str) -> Option<Section> {
        self.sections
            .iter()
            .find(|s| s.citations.iter().any(|k| k == key))
            .map(|s| s.section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_unvalidated() {
        let doc = SectionDocument::new(Section::Methods, "body", Vec::new(), 1);
        assert_eq!(doc.state, DocumentState::Unvalidated);
    }

    #[test]
    fn test_manuscript_citations_first_appearance_order() {
        let manuscript = Manuscript {
            sections: vec![
                SectionDocument::new(
                    Section::Methods,
                    "",
                    vec!["b2020".to_string(), "a2021".to_string()],
                    10,
                ),
                SectionDocument::new(
                    Section::Results,
                    "",
                    vec!["a2021".to_string(), "c2022".to_string()],
                    10,
                ),
            ],
            body: String::new(),
            bibliography: Vec::new(),
            table_count: 0,
        };

        assert_eq!(manuscript.citations(), vec!["b2020", "a2021", "c2022"]);
        assert_eq!(manuscript.section_of("a2021"), Some(Section::Methods));
        assert_eq!(manuscript.section_of("ghost"), None);
        assert_eq!(manuscript.word_count(), 20);
    }

    #[test]
    fn test_mark_transitions() {
        let mut doc = SectionDocument::new(Section::Methods, "body", Vec::new(), 1);
        doc.mark(true);
        assert_eq!(doc.state, DocumentState::Passed);
        doc.mark(false);
        assert_eq!(doc.state, DocumentState::Failed);
    }
}
