use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::schema::{ValidationConfig, DEFAULT_LOG_PATH};
use crate::error::{Error, Result};
use crate::fs::{FileSystem, OsFileSystem};
use crate::validation::iso_timestamp;
use crate::validation::types::{EnrichedDuplicateInfo, ValidationReport};

/// Writes and reads the JSON validation report. Each save overwrites the file.
pub struct ValidationReportGenerator<F: FileSystem = OsFileSystem> {
    fs: F,
    default_path: PathBuf,
}

impl Default for ValidationReportGenerator<OsFileSystem> {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl ValidationReportGenerator<OsFileSystem> {
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Self::with_fs(OsFileSystem, default_path)
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(&config.log_path)
    }
}

impl<F: FileSystem> ValidationReportGenerator<F> {
    pub fn with_fs(fs: F, default_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            default_path: default_path.into(),
        }
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn build_report(
        &self,
        total_workflows: usize,
        duplicates: &[EnrichedDuplicateInfo],
    ) -> ValidationReport {
        ValidationReport {
            timestamp: iso_timestamp(Utc::now()),
            total_workflows,
            duplicates_found: duplicates.len(),
            duplicates: duplicates.to_vec(),
        }
    }

    /// Saves to `path`, or to the configured log path, creating parent
    /// directories first. Returns the path written.
    pub fn save_report(
        &self,
        total_workflows: usize,
        duplicates: &[EnrichedDuplicateInfo],
        path: Option<&Path>,
    ) -> Result<PathBuf> {
        let target = path.unwrap_or(self.default_path.as_path()).to_path_buf();
        let report = self.build_report(total_workflows, duplicates);
        let body = serde_json::to_string_pretty(&report)
            .map_err(|err| Error::Serialization(err.to_string()))?;

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        self.fs.write(&target, &body)?;

        tracing::info!(
            path = %target.display(),
            total_workflows,
            duplicates_found = report.duplicates_found,
            "validation report saved"
        );
        Ok(target)
    }

    /// `None` when the report is missing or unreadable.
    pub fn read_report(&self, path: &Path) -> Option<ValidationReport> {
        let raw = match self.fs.read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "no validation report to read");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring corrupt validation report");
                None
            }
        }
    }

    pub fn format_report_summary(&self, report: &ValidationReport) -> String {
        let mut lines = vec![
            format!("Validation report from {}", report.timestamp),
            format!("  Workflows checked: {}", report.total_workflows),
            format!("  Duplicate IDs found: {}", report.duplicates_found),
        ];

        for duplicate in &report.duplicates {
            let mut line = format!(
                "  - {} ×{}: {}",
                duplicate.internal_id(),
                duplicate.count(),
                duplicate.n8n_ids().join(", ")
            );
            if !duplicate.suggestions.is_empty() {
                line.push_str(&format!(" (suggested: {})", duplicate.suggestions.join(", ")));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}
