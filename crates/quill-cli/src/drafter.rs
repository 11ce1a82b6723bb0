//! Subprocess-backed section drafter.

use async_trait::async_trait;
use quill_domain::Section;
use quill_scheduler::{DraftError, SectionDrafter};
use tokio::process::Command;

/// Drafts sections by running an external command.
///
/// The command gets any configured arguments followed by the section
/// name, and must print the markdown body to stdout. A non-zero exit
/// status fails the draft with the command's stderr as the message.
pub struct CommandDrafter {
    program: String,
    args: Vec<String>,
}

impl CommandDrafter {
    /// Create a drafter for the given command line.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl SectionDrafter for CommandDrafter {
    async fn draft(&self, section: Section) -> Result<String, DraftError> {
        tracing::debug!(command = %self.program, section = section.as_str(), "running drafter");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(section.as_str())
            .output()
            .await
            .map_err(|e| DraftError(format!("failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DraftError(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| DraftError(format!("'{}' produced non-UTF-8 output", self.program)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stdout_becomes_body() {
        let drafter = CommandDrafter::new("echo", vec!["Body for".to_string()]);
        let body = drafter.draft(Section::Methods).await.unwrap();
        assert_eq!(body.trim(), "Body for methods");
    }

    #[tokio::test]
    async fn test_missing_command_fails() {
        let drafter = CommandDrafter::new("quill-no-such-command", Vec::new());
        assert!(drafter.draft(Section::Methods).await.is_err());
    }

    #[tokio::test]
    async fn test_nonzero_exit_fails() {
        let drafter = CommandDrafter::new("false", Vec::new());
        assert!(drafter.draft(Section::Methods).await.is_err());
    }
}
