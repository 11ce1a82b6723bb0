//! Section module - the closed set of manuscript sections

use serde::{Deserialize, Serialize};

/// A manuscript section
///
/// Sections form a closed, small set. Variant order is assembly order:
/// the assembled manuscript concatenates sections in the order declared
/// here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Abstract - drafted last, depends on everything else
    Abstract,

    /// Introduction and motivation
    Introduction,

    /// Methods used by the work
    Methods,

    /// Results obtained
    Results,

    /// Discussion of the results
    Discussion,

    /// Data and code availability statement
    Availability,
}

impl Section {
    /// All sections, in assembly order
    pub const ALL: [Section; 6] = [
        Section::Abstract,
        Section::Introduction,
        Section::Methods,
        Section::Results,
        Section::Discussion,
        Section::Availability,
    ];

    /// Get the section name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Abstract => "abstract",
            Section::Introduction => "introduction",
            Section::Methods => "methods",
            Section::Results => "results",
            Section::Discussion => "discussion",
            Section::Availability => "availability",
        }
    }

    /// Parse a section from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "abstract" => Some(Section::Abstract),
            "introduction" => Some(Section::Introduction),
            "methods" => Some(Section::Methods),
            "results" => Some(Section::Results),
            "discussion" => Some(Section::Discussion),
            "availability" => Some(Section::Availability),
            _ => None,
        }
    }

    /// Target word count for this section
    ///
    /// Journals auto-reject at word limit violations, so drafts are held
    /// to a ±20% tolerance around these targets.
    pub fn target_words(&self) -> usize {
        match self {
            Section::Abstract => 150,
            Section::Introduction => 500,
            Section::Methods => 600,
            Section::Results => 800,
            Section::Discussion => 700,
            Section::Availability => 100,
        }
    }

    /// Acceptable word-count range (±20% of target)
    pub fn word_range(&self) -> (usize, usize) {
        let target = self.target_words();
        (target * 8 / 10, target * 12 / 10)
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid section: {}", s))
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_order() {
        let mut sorted = Section::ALL;
        sorted.sort();
        assert_eq!(sorted, Section::ALL);
        assert_eq!(Section::ALL[0], Section::Abstract);
        assert_eq!(Section::ALL[5], Section::Availability);
    }

    #[test]
    fn test_parse_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::parse(section.as_str()), Some(section));
        }
        assert_eq!(Section::parse("conclusion"), None);
    }

    #[test]
    fn test_word_range_tolerance() {
        let (min, max) = Section::Abstract.word_range();
        assert_eq!(min, 120);
        assert_eq!(max, 180);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing is case-insensitive for every valid name
        #[test]
        fn test_parse_case_insensitive(idx in 0usize..6, upper: bool) {
            let section = Section::ALL[idx];
            let name = if upper {
                section.as_str().to_uppercase()
            } else {
                section.as_str().to_string()
            };
            prop_assert_eq!(Section::parse(&name), Some(section));
        }

        /// Property: the acceptable range always brackets the target
        #[test]
        fn test_word_range_brackets_target(idx in 0usize..6) {
            let section = Section::ALL[idx];
            let (min, max) = section.word_range();
            prop_assert!(min <= section.target_words());
            prop_assert!(section.target_words() <= max);
        }
    }
}
