//! Usage-type module - why a citation is used

use serde::{Deserialize, Serialize};

/// Classification of why a citation is used in the manuscript
///
/// Usage types drive the section-appropriateness rules: a methods-like
/// section cites the tools and datasets it used, not broad reviews.
/// Classification is heuristic and supplied externally (literature
/// research tags each evidence entry); `Unknown` marks an untagged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    /// Software or analysis tool used by the work
    Tool,

    /// Dataset the work consumed or produced
    Dataset,

    /// Experimental or computational protocol followed
    Protocol,

    /// Underlying scientific principle or theory
    Principle,

    /// Survey or review article
    Review,

    /// Foundational paper for the field
    Seminal,

    /// Not yet classified
    Unknown,
}

impl UsageType {
    /// All usage types, in declared order
    pub const ALL: [UsageType; 7] = [
        UsageType::Tool,
        UsageType::Dataset,
        UsageType::Protocol,
        UsageType::Principle,
        UsageType::Review,
        UsageType::Seminal,
        UsageType::Unknown,
    ];

    /// Get the usage-type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageType::Tool => "tool",
            UsageType::Dataset => "dataset",
            UsageType::Protocol => "protocol",
            UsageType::Principle => "principle",
            UsageType::Review => "review",
            UsageType::Seminal => "seminal",
            UsageType::Unknown => "unknown",
        }
    }

    /// Parse a usage type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tool" => Some(UsageType::Tool),
            "dataset" => Some(UsageType::Dataset),
            "protocol" => Some(UsageType::Protocol),
            "principle" => Some(UsageType::Principle),
            "review" => Some(UsageType::Review),
            "seminal" => Some(UsageType::Seminal),
            "unknown" => Some(UsageType::Unknown),
            _ => None,
        }
    }
}

impl std::str::FromStr for UsageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid usage type: {}", s))
    }
}

impl std::fmt::Display for UsageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(UsageType::parse("tool"), Some(UsageType::Tool));
        assert_eq!(UsageType::parse("Seminal"), Some(UsageType::Seminal));
        assert_eq!(UsageType::parse("grant"), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for usage in UsageType::ALL {
            assert_eq!(UsageType::parse(usage.as_str()), Some(usage));
        }
    }
}
