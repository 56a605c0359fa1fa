use std::path::Path;

use jana_core::validation::{
    EnrichedDuplicateInfo, ErrorMessageFormatter, ValidationReport, ValidationResult,
};
use jana_core::Config;
use serde_json::json;

use crate::cli::OutputFormat;

/// Prints command output. JSON mode keeps stdout machine-readable and moves
/// notes to stderr.
pub struct Renderer {
    output_format: OutputFormat,
    compact: bool,
}

impl Renderer {
    pub fn new(output_format: OutputFormat) -> Self {
        Self {
            output_format,
            compact: false,
        }
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn render_success(
        &self,
        result: &ValidationResult,
        formatter: &ErrorMessageFormatter,
    ) -> anyhow::Result<()> {
        match self.output_format {
            OutputFormat::Text => {
                for line in formatter.format_success(result.total_workflows) {
                    println!("{line}");
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        }
        Ok(())
    }

    pub fn render_summary(
        &self,
        total_workflows: usize,
        duplicates: &[EnrichedDuplicateInfo],
        messages: &[String],
        formatter: &ErrorMessageFormatter,
    ) -> anyhow::Result<()> {
        match self.output_format {
            OutputFormat::Text if self.compact => {
                if let Some(header) = messages.first() {
                    println!("{header}");
                }
                for line in formatter.format_compact(duplicates) {
                    println!("  {line}");
                }
            }
            OutputFormat::Text => {
                for message in messages {
                    println!("{message}");
                }
            }
            OutputFormat::Json => {
                let payload = json!({
                    "valid": duplicates.is_empty(),
                    "totalWorkflows": total_workflows,
                    "duplicatesFound": duplicates.len(),
                    "duplicates": duplicates,
                    "messages": messages,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
        }
        Ok(())
    }

    pub fn render_messages(&self, messages: &[String]) {
        for message in messages {
            self.note(message);
        }
    }

    pub fn render_report_saved(&self, path: &Path) {
        self.note(&format!("📝 Report saved to {}", path.display()));
    }

    pub fn render_report(&self, summary: &str, report: &ValidationReport) -> anyhow::Result<()> {
        match self.output_format {
            OutputFormat::Text => println!("{summary}"),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        }
        Ok(())
    }

    pub fn render_config(&self, config: &Config) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(config)?);
        Ok(())
    }

    fn note(&self, message: &str) {
        match self.output_format {
            OutputFormat::Text => println!("{message}"),
            OutputFormat::Json => eprintln!("{message}"),
        }
    }
}
