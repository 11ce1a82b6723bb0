//! Validation configuration

use serde::{Deserialize, Serialize};

/// Configuration for the validation pipeline
///
/// `strict_mode` is the explicit toggle that promotes Layer 2 findings
/// from warnings to errors. It is never inferred from context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Promote section-appropriateness findings to hard failures
    pub strict_mode: bool,

    /// Manuscript-wide citation ceiling (Layer 3 aggregate limit)
    pub max_total_citations: usize,

    /// Manuscript-wide table ceiling (Layer 3 aggregate limit)
    pub max_tables: usize,

    /// Check section word counts against their targets
    pub check_word_count: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_total_citations: 60,
            max_tables: 5,
            check_word_count: true,
        }
    }
}

impl ValidationConfig {
    /// Strict configuration: Layer 2 findings become errors
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }

    /// Permissive configuration: appropriateness and length advisory only
    pub fn permissive() -> Self {
        Self {
            strict_mode: false,
            check_word_count: false,
            ..Self::default()
        }
    }
}
