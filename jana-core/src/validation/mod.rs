//! Duplicate internal-ID validation for batches of n8n workflows.
//!
//! Extraction pulls an internal ID such as `(ERR-OUT-001)` out of each
//! workflow, detection groups shared IDs, the suggestion engine proposes free
//! replacements, and the formatter and report generator present the result.
//! [`WorkflowValidationService`] wires the steps together.

pub mod detector;
pub mod extractor;
pub mod formatter;
pub mod report;
pub mod service;
pub mod suggestion;
pub mod types;

use chrono::{DateTime, SecondsFormat, Utc};

pub use detector::DuplicateIdDetector;
pub use extractor::InternalIdExtractor;
pub use formatter::ErrorMessageFormatter;
pub use report::ValidationReportGenerator;
pub use service::WorkflowValidationService;
pub use suggestion::IdSuggestionEngine;
pub use types::{
    DuplicateInfo, EnrichedDuplicateInfo, IdMap, ValidationError, ValidationReport,
    ValidationResult, ValidationSummary,
};

pub(crate) fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
