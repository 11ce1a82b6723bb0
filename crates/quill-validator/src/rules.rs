//! Section-appropriateness rules (Layer 2)
//!
//! Kept as pure data keyed by section so new journals/sections extend the
//! table instead of adding branches.

use quill_domain::{Section, UsageType};

/// One row of the appropriateness table
#[derive(Debug, Clone, Copy)]
pub struct SectionRules {
    /// Section the row applies to
    pub section: Section,

    /// Usage types acceptable in this section
    pub allowed: &'static [UsageType],

    /// Citation-count ceiling for this section
    pub ceiling: usize,
}

const TABLE: [SectionRules; 6] = [
    SectionRules {
        section: Section::Abstract,
        allowed: &[UsageType::Seminal],
        ceiling: 2,
    },
    SectionRules {
        section: Section::Introduction,
        allowed: &[UsageType::Seminal, UsageType::Review, UsageType::Principle],
        ceiling: 10,
    },
    SectionRules {
        section: Section::Methods,
        allowed: &[UsageType::Tool, UsageType::Dataset, UsageType::Protocol],
        ceiling: 15,
    },
    SectionRules {
        section: Section::Results,
        allowed: &[UsageType::Tool, UsageType::Dataset],
        ceiling: 10,
    },
    SectionRules {
        section: Section::Discussion,
        allowed: &[UsageType::Principle, UsageType::Review, UsageType::Seminal],
        ceiling: 15,
    },
    SectionRules {
        section: Section::Availability,
        allowed: &[UsageType::Tool, UsageType::Dataset],
        ceiling: 5,
    },
];

impl SectionRules {
    /// Rules for a section
    pub fn for_section(section: Section) -> SectionRules {
        // TABLE covers every Section variant
        TABLE
            .iter()
            .copied()
            .find(|r| r.section == section)
            .unwrap_or(TABLE[0])
    }

    /// Whether a usage type is acceptable in this section
    ///
    /// `Unknown` passes everywhere: usage-type classification is heuristic
    /// and an unclassified entry must not block progress.
    pub fn allows(&self, usage: UsageType) -> bool {
        usage == UsageType::Unknown || self.allowed.contains(&usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_allows_tools_not_principles() {
        let rules = SectionRules::for_section(Section::Methods);
        assert!(rules.allows(UsageType::Tool));
        assert!(rules.allows(UsageType::Protocol));
        assert!(!rules.allows(UsageType::Principle));
        assert!(!rules.allows(UsageType::Review));
    }

    #[test]
    fn test_abstract_is_seminal_only() {
        let rules = SectionRules::for_section(Section::Abstract);
        assert!(rules.allows(UsageType::Seminal));
        assert!(!rules.allows(UsageType::Tool));
        assert_eq!(rules.ceiling, 2);
    }

    #[test]
    fn test_unknown_allowed_everywhere() {
        for section in Section::ALL {
            assert!(SectionRules::for_section(section).allows(UsageType::Unknown));
        }
    }

    #[test]
    fn test_table_covers_all_sections() {
        for section in Section::ALL {
            assert_eq!(SectionRules::for_section(section).section, section);
        }
    }
}
