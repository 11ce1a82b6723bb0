//! Project configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration, read from `quill.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace file locations
    #[serde(default)]
    pub paths: Paths,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationSettings,

    /// Drafting settings
    #[serde(default)]
    pub draft: DraftSettings,
}

/// Workspace file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Evidence store file
    #[serde(default = "default_evidence")]
    pub evidence: PathBuf,

    /// Audit trail file
    #[serde(default = "default_audit")]
    pub audit: PathBuf,

    /// Workflow state ledger file
    #[serde(default = "default_ledger")]
    pub ledger: PathBuf,

    /// Directory holding accepted section drafts
    #[serde(default = "default_sections")]
    pub sections: PathBuf,

    /// Assembled manuscript output file
    #[serde(default = "default_manuscript")]
    pub manuscript: PathBuf,

    /// Bibliography file, one citation key per line
    #[serde(default = "default_bibliography")]
    pub bibliography: PathBuf,
}

/// Validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Promote section-appropriateness findings to errors
    #[serde(default)]
    pub strict: bool,

    /// Manuscript-wide citation ceiling
    #[serde(default = "default_max_citations")]
    pub max_total_citations: usize,

    /// Manuscript-wide table ceiling
    #[serde(default = "default_max_tables")]
    pub max_tables: usize,
}

/// Drafting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSettings {
    /// External drafter command; receives the section name as its final
    /// argument and must print the section body to stdout
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments passed before the section name
    #[serde(default)]
    pub args: Vec<String>,

    /// Bound on concurrently running draft tasks
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Config {
    /// Load configuration from an explicit path or `./quill.toml`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new("quill.toml"));
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Convert the configured validation settings, with a strict override.
    pub fn validation_config(&self, strict: bool) -> quill_validator::ValidationConfig {
        quill_validator::ValidationConfig {
            strict_mode: strict || self.validation.strict,
            max_total_citations: self.validation.max_total_citations,
            max_tables: self.validation.max_tables,
            ..quill_validator::ValidationConfig::default()
        }
    }

    /// Path to one section's accepted draft file.
    pub fn section_file(&self, section: quill_domain::Section) -> PathBuf {
        self.paths.sections.join(format!("{}.md", section.as_str()))
    }

    /// Read the bibliography file into citation keys.
    ///
    /// Blank lines and `#` comments are ignored. A missing file is an
    /// empty bibliography, which assembly will flag on its own.
    pub fn read_bibliography(&self, path: Option<&Path>) -> Result<Vec<String>> {
        let path = path.unwrap_or(&self.paths.bibliography);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(String::from)
            .collect())
    }

    /// Validate settings that cannot be expressed in types.
    pub fn check(&self) -> Result<()> {
        if self.draft.max_concurrent == 0 {
            return Err(CliError::Config(
                "draft.max_concurrent must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            evidence: default_evidence(),
            audit: default_audit(),
            ledger: default_ledger(),
            sections: default_sections(),
            manuscript: default_manuscript(),
            bibliography: default_bibliography(),
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            strict: false,
            max_total_citations: default_max_citations(),
            max_tables: default_max_tables(),
        }
    }
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_evidence() -> PathBuf {
    PathBuf::from("literature_evidence.tsv")
}

fn default_audit() -> PathBuf {
    PathBuf::from("citation_audit.jsonl")
}

fn default_ledger() -> PathBuf {
    PathBuf::from("workflow_state.json")
}

fn default_sections() -> PathBuf {
    PathBuf::from("sections")
}

fn default_manuscript() -> PathBuf {
    PathBuf::from("manuscript.md")
}

fn default_bibliography() -> PathBuf {
    PathBuf::from("bibliography.txt")
}

fn default_max_citations() -> usize {
    60
}

fn default_max_tables() -> usize {
    5
}

fn default_command() -> String {
    "quill-draft".to_string()
}

fn default_max_concurrent() -> usize {
    quill_scheduler::DEFAULT_MAX_CONCURRENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.evidence, PathBuf::from("literature_evidence.tsv"));
        assert_eq!(config.draft.max_concurrent, 3);
        assert!(!config.validation.strict);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "[validation]\nstrict = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.validation.strict);
        assert_eq!(config.validation.max_tables, 5);
        assert_eq!(config.draft.command, "quill-draft");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Some(Path::new("/nonexistent/quill.toml"))).unwrap();
        assert_eq!(config.draft.max_concurrent, 3);
    }

    #[test]
    fn test_strict_override_wins() {
        let config = Config::default();
        assert!(config.validation_config(true).strict_mode);
        assert!(!config.validation_config(false).strict_mode);
    }

    #[test]
    fn test_bibliography_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bibliography.txt");
        std::fs::write(&path, "# keys\nsmith2024\n\njones2023\n").unwrap();

        let config = Config::default();
        let keys = config.read_bibliography(Some(&path)).unwrap();
        assert_eq!(keys, vec!["smith2024", "jones2023"]);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.draft.max_concurrent = 0;
        assert!(config.check().is_err());
    }
}
