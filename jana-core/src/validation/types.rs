use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Internal ID → n8n IDs of the workflows carrying it, in input order.
pub type IdMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateInfo {
    #[serde(rename = "internalID")]
    pub internal_id: String,
    #[serde(rename = "n8nIDs")]
    pub n8n_ids: Vec<String>,
    pub count: usize,
}

impl DuplicateInfo {
    pub fn new(internal_id: impl Into<String>, n8n_ids: Vec<String>) -> Self {
        let count = n8n_ids.len();
        Self {
            internal_id: internal_id.into(),
            n8n_ids,
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedDuplicateInfo {
    #[serde(flatten)]
    pub duplicate: DuplicateInfo,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl EnrichedDuplicateInfo {
    pub fn internal_id(&self) -> &str {
        &self.duplicate.internal_id
    }

    pub fn n8n_ids(&self) -> &[String] {
        &self.duplicate.n8n_ids
    }

    pub fn count(&self) -> usize {
        self.duplicate.count
    }
}

/// Outcome of a blocking validation run that found no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub duplicates: Vec<EnrichedDuplicateInfo>,
    pub total_workflows: usize,
    pub validated_at: DateTime<Utc>,
}

/// Outcome of a non-blocking run; duplicates are reported, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub valid: bool,
    pub duplicates: Vec<EnrichedDuplicateInfo>,
    pub messages: Vec<String>,
    pub total_workflows: usize,
}

/// Report persisted after a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub timestamp: String,
    pub total_workflows: usize,
    pub duplicates_found: usize,
    pub duplicates: Vec<EnrichedDuplicateInfo>,
}

/// Raised by the blocking entry point when duplicate internal IDs exist.
#[derive(Debug, Clone, Error)]
#[error("found {} duplicate internal ID(s)", .duplicates.len())]
pub struct ValidationError {
    pub messages: Vec<String>,
    pub duplicates: Vec<EnrichedDuplicateInfo>,
    pub total_workflows: usize,
}
