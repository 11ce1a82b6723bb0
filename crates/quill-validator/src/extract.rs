//! Extraction of citations, word counts, and tables from markdown

use once_cell::sync::Lazy;
use quill_domain::{Section, SectionDocument};
use regex::Regex;

/// `[author2024]` / `[author2024a]` style citation keys
static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([a-zA-Z]+\d{4}[a-z]?)\]").unwrap());

static CODE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+\s").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Citation keys referenced in a markdown body, in order of first
/// appearance, deduplicated
pub fn citations(body: &str) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut keys = Vec::new();
    for capture in CITATION_RE.captures_iter(body) {
        let key = capture[1].to_string();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// Word count with markdown syntax stripped
///
/// Code blocks, inline code and header markers are removed and link text
/// is kept without its URL, matching how journals count prose.
pub fn word_count(body: &str) -> usize {
    let stripped = CODE_BLOCK_RE.replace_all(body, "");
    let stripped = INLINE_CODE_RE.replace_all(&stripped, "");
    let stripped = HEADER_RE.replace_all(&stripped, "");
    let stripped = LINK_RE.replace_all(&stripped, "$1");
    stripped.split_whitespace().count()
}

/// Number of markdown table blocks (runs of consecutive `|` lines)
pub fn table_count(body: &str) -> usize {
    let mut count = 0;
    let mut in_table = false;
    for line in body.lines() {
        if line.trim_start().starts_with('|') {
            if !in_table {
                count += 1;
                in_table = true;
            }
        } else {
            in_table = false;
        }
    }
    count
}

/// Build a `SectionDocument` from a markdown body
pub fn section_document(section: Section, body: &str) -> SectionDocument {
    SectionDocument::new(section, body, citations(body), word_count(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citations_first_appearance_deduped() {
        let body = "Built on [smith2024] and [jones2023]; see [smith2024] again.";
        assert_eq!(citations(body), vec!["smith2024", "jones2023"]);
    }

    #[test]
    fn test_citations_ignore_plain_links() {
        let body = "See [the docs](https://example.org) and [smith2024].";
        assert_eq!(citations(body), vec!["smith2024"]);
    }

    #[test]
    fn test_citation_suffix_letter() {
        assert_eq!(citations("[smith2024a] [smith2024b]"), vec!["smith2024a", "smith2024b"]);
    }

    #[test]
    fn test_word_count_strips_markdown() {
        let body = "# Header\n\nThree words here `code` and ```\nblock\n``` [link text](u)";
        // "Three words here and link text" -> 7 with "Header"
        assert_eq!(word_count(body), 7);
    }

    #[test]
    fn test_table_count_runs() {
        let body = "| a | b |\n| - | - |\n| 1 | 2 |\n\ntext\n\n| c |\n| - |";
        assert_eq!(table_count(body), 2);
    }

    #[test]
    fn test_section_document_fields() {
        let doc = section_document(Section::Methods, "Uses [smith2024] throughout.");
        assert_eq!(doc.section, Section::Methods);
        assert_eq!(doc.citations, vec!["smith2024"]);
        assert_eq!(doc.word_count, 3);
    }
}
