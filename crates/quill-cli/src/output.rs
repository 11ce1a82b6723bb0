//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use quill_domain::{Finding, Section, UsageType, Verdict, VerdictStatus};
use quill_evidence::EvidenceReport;
use quill_ledger::LedgerState;
use quill_tracer::Trace;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a validation verdict.
    pub fn format_verdict(&self, verdict: &Verdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(verdict)?),
            OutputFormat::Text => Ok(self.format_verdict_text(verdict)),
        }
    }

    fn format_verdict_text(&self, verdict: &Verdict) -> String {
        let mut out = String::new();
        let status = match verdict.status {
            VerdictStatus::Pass => self.colorize("PASS", "green"),
            VerdictStatus::Fail => self.colorize("FAIL", "red"),
        };
        out.push_str(&format!("{} ({})\n", status, verdict.summary()));
        for finding in &verdict.errors {
            out.push_str(&self.format_finding(finding, "✗", "red"));
        }
        for finding in &verdict.warnings {
            out.push_str(&self.format_finding(finding, "⚠", "yellow"));
        }
        for line in &verdict.info {
            out.push_str(&format!("  {}\n", self.colorize(&format!("ℹ {}", line), "blue")));
        }
        out
    }

    fn format_finding(&self, finding: &Finding, mark: &str, color: &str) -> String {
        let mut line = format!(
            "  {}\n",
            self.colorize(&format!("{} {}", mark, finding.message), color)
        );
        if let Some(remediation) = finding.remediation {
            line.push_str(&format!("    fix: {}\n", remediation.describe()));
        }
        line
    }

    /// Format a root-cause trace.
    pub fn format_trace(&self, trace: &Trace) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(trace)?),
            OutputFormat::Text => Ok(trace.report()),
        }
    }

    /// Format the ledger status table.
    pub fn format_status(&self, state: &LedgerState) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
            OutputFormat::Text => Ok(self.format_status_table(state)),
        }
    }

    fn format_status_table(&self, state: &LedgerState) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Section", "Status"]);
        for section in Section::ALL {
            let status = if state.completed.contains(&section) {
                self.colorize("completed", "green")
            } else {
                "pending".to_string()
            };
            builder.push_record([section.as_str(), status.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        out.push('\n');
        out.push_str(&format!(
            "assembled: {}\n",
            if state.assembled { "yes" } else { "no" }
        ));
        for (kind, version) in &state.versions {
            out.push_str(&format!("{} review: v{}\n", kind, version));
        }
        out
    }

    /// Format the evidence report.
    pub fn format_report(&self, report: &EvidenceReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &EvidenceReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Usage", "Citations"]);
        for usage in UsageType::ALL {
            let count = report
                .usage_counts
                .get(usage.as_str())
                .copied()
                .unwrap_or(0);
            builder.push_record([usage.as_str().to_string(), count.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        out.push('\n');
        out.push_str(&format!(
            "citations: {} active, {} retracted, {} unclassified\n",
            report.active_citations, report.retracted_citations, report.unclassified_citations
        ));
        out.push_str(&format!(
            "evaluations: {} recorded, {} failed, {} distinct keys\n",
            report.evaluations, report.failed_evaluations, report.keys_evaluated
        ));
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
