use std::time::Instant;

use chrono::Utc;

use crate::config::schema::{ValidationConfig, DEFAULT_MAX_DUPLICATES};
use crate::error::Result;
use crate::validation::detector::DuplicateIdDetector;
use crate::validation::extractor::InternalIdExtractor;
use crate::validation::formatter::ErrorMessageFormatter;
use crate::validation::suggestion::IdSuggestionEngine;
use crate::validation::types::{
    EnrichedDuplicateInfo, ValidationError, ValidationResult, ValidationSummary,
};
use crate::workflow::Workflow;

/// Runs extraction, detection, suggestion and formatting over a workflow batch.
#[derive(Debug, Clone)]
pub struct WorkflowValidationService {
    extractor: InternalIdExtractor,
    detector: DuplicateIdDetector,
    suggestions: IdSuggestionEngine,
    formatter: ErrorMessageFormatter,
    max_duplicates: usize,
}

struct Analysis {
    total_workflows: usize,
    duplicates: Vec<EnrichedDuplicateInfo>,
    duration_ms: u128,
}

impl WorkflowValidationService {
    pub fn new(config: &ValidationConfig) -> Result<Self> {
        let extractor = InternalIdExtractor::new(&config.id_pattern)?;
        Ok(Self::with_extractor(extractor).with_max_duplicates(config.max_duplicates))
    }

    pub fn with_extractor(extractor: InternalIdExtractor) -> Self {
        Self {
            extractor,
            detector: DuplicateIdDetector::new(),
            suggestions: IdSuggestionEngine::new(),
            formatter: ErrorMessageFormatter::new().with_group_limit(DEFAULT_MAX_DUPLICATES),
            max_duplicates: DEFAULT_MAX_DUPLICATES,
        }
    }

    pub fn with_max_duplicates(mut self, max_duplicates: usize) -> Self {
        let max_duplicates = max_duplicates.max(1);
        self.max_duplicates = max_duplicates;
        self.formatter = self.formatter.with_group_limit(max_duplicates);
        self
    }

    pub fn formatter(&self) -> &ErrorMessageFormatter {
        &self.formatter
    }

    /// Blocking entry point: duplicates come back as [`ValidationError`].
    pub fn validate_workflows(
        &self,
        workflows: &[Workflow],
    ) -> std::result::Result<ValidationResult, ValidationError> {
        let analysis = self.analyze(workflows);
        self.warn_if_truncated(&analysis);

        if analysis.duplicates.is_empty() {
            tracing::info!(
                duration_ms = analysis.duration_ms as u64,
                total_workflows = analysis.total_workflows,
                duplicates_found = 0,
                "workflow validation passed"
            );
            return Ok(ValidationResult {
                valid: true,
                duplicates: Vec::new(),
                total_workflows: analysis.total_workflows,
                validated_at: Utc::now(),
            });
        }

        tracing::error!(
            duration_ms = analysis.duration_ms as u64,
            total_workflows = analysis.total_workflows,
            duplicates_found = analysis.duplicates.len(),
            duplicates = ?analysis.duplicates,
            "duplicate internal IDs detected"
        );

        Err(ValidationError {
            messages: self.formatter.format(&analysis.duplicates),
            duplicates: analysis.duplicates,
            total_workflows: analysis.total_workflows,
        })
    }

    /// Same pipeline as [`Self::validate_workflows`] but never fails.
    pub fn validate_workflows_non_blocking(&self, workflows: &[Workflow]) -> ValidationSummary {
        let analysis = self.analyze(workflows);
        self.warn_if_truncated(&analysis);

        let messages = if analysis.duplicates.is_empty() {
            tracing::info!(
                duration_ms = analysis.duration_ms as u64,
                total_workflows = analysis.total_workflows,
                duplicates_found = 0,
                "workflow validation passed"
            );
            self.formatter.format_success(analysis.total_workflows)
        } else {
            tracing::warn!(
                duration_ms = analysis.duration_ms as u64,
                total_workflows = analysis.total_workflows,
                duplicates_found = analysis.duplicates.len(),
                "duplicate internal IDs detected; continuing"
            );
            self.formatter.format(&analysis.duplicates)
        };

        ValidationSummary {
            valid: analysis.duplicates.is_empty(),
            duplicates: analysis.duplicates,
            messages,
            total_workflows: analysis.total_workflows,
        }
    }

    /// Success banner or detailed duplicate report as a single string. Emits no
    /// log events.
    pub fn generate_report(&self, workflows: &[Workflow]) -> String {
        let analysis = self.analyze(workflows);

        if analysis.duplicates.is_empty() {
            return self
                .formatter
                .format_success(analysis.total_workflows)
                .join("\n");
        }

        let mut sections = vec![self
            .formatter
            .format_log_header(analysis.duplicates.len(), analysis.total_workflows)];
        sections.extend(self.formatter.format(&analysis.duplicates));
        sections.join("\n")
    }

    fn warn_if_truncated(&self, analysis: &Analysis) {
        if analysis.duplicates.len() > self.max_duplicates {
            tracing::warn!(
                duplicates_found = analysis.duplicates.len(),
                max_duplicates = self.max_duplicates,
                "duplicate groups exceed maxDuplicates; only the first are given suggestions"
            );
        }
    }

    fn analyze(&self, workflows: &[Workflow]) -> Analysis {
        let started = Instant::now();

        let id_map = self.extractor.extract_internal_ids(workflows);
        let duplicates = self.detector.find_duplicates(&id_map);

        let duplicates = if duplicates.is_empty() {
            Vec::new()
        } else {
            self.suggestions
                .enrich_first(&duplicates, &id_map, self.max_duplicates)
        };

        Analysis {
            total_workflows: workflows.len(),
            duplicates,
            duration_ms: started.elapsed().as_millis(),
        }
    }
}
