use chrono::Utc;

use crate::validation::iso_timestamp;
use crate::validation::types::EnrichedDuplicateInfo;

const RULE: &str = "════════════════════════════════════════════════════════════";
const NO_SUGGESTION: &str = "no suggestion available";

/// Renders duplicate groups as console-ready text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMessageFormatter {
    group_limit: Option<usize>,
}

impl ErrorMessageFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detail at most `limit` groups in [`Self::format`]; the rest are counted.
    pub fn with_group_limit(mut self, limit: usize) -> Self {
        self.group_limit = Some(limit);
        self
    }

    /// The first owner keeps the ID; owner `i` is offered `suggestions[i - 1]`.
    pub fn format_single(&self, duplicate: &EnrichedDuplicateInfo) -> String {
        let mut lines = vec![format!(
            "🔴 Internal ID {} is used by {} workflows:",
            duplicate.internal_id(),
            duplicate.count()
        )];

        for (index, n8n_id) in duplicate.n8n_ids().iter().enumerate() {
            if index == 0 {
                lines.push(format!("   • {n8n_id} (keeps the ID)"));
                continue;
            }
            let suggestion = duplicate
                .suggestions
                .get(index - 1)
                .map(|id| format!("change to {id}"))
                .unwrap_or_else(|| NO_SUGGESTION.to_owned());
            lines.push(format!("   • {n8n_id} → Suggestion: {suggestion}"));
        }

        lines.join("\n")
    }

    pub fn format(&self, duplicates: &[EnrichedDuplicateInfo]) -> Vec<String> {
        let shown = self
            .group_limit
            .unwrap_or(usize::MAX)
            .min(duplicates.len());

        let mut messages = Vec::with_capacity(shown + 3);
        messages.push(format!(
            "❌ Detected {} duplicate internal ID(s)",
            duplicates.len()
        ));
        messages.extend(duplicates[..shown].iter().map(|dup| self.format_single(dup)));

        let omitted = duplicates.len() - shown;
        if omitted > 0 {
            messages.push(format!("… {omitted} more duplicate group(s) omitted"));
        }

        messages.push(
            "💡 Rename the flagged workflows in n8n so every internal ID is unique, then run again."
                .to_owned(),
        );
        messages
    }

    pub fn format_compact(&self, duplicates: &[EnrichedDuplicateInfo]) -> Vec<String> {
        duplicates
            .iter()
            .map(|duplicate| {
                format!(
                    "{} ×{} → {}",
                    duplicate.internal_id(),
                    duplicate.count(),
                    duplicate
                        .suggestions
                        .first()
                        .map(String::as_str)
                        .unwrap_or("N/A")
                )
            })
            .collect()
    }

    pub fn format_success(&self, total_workflows: usize) -> Vec<String> {
        vec![
            "✅ Validation passed: no duplicate internal IDs".to_owned(),
            format!("   {total_workflows} workflow(s) checked"),
        ]
    }

    pub fn format_log_header(&self, duplicate_count: usize, total_count: usize) -> String {
        [
            RULE.to_owned(),
            format!("🔍 Workflow validation - {}", iso_timestamp(Utc::now())),
            format!("   Workflows: {total_count} | Duplicate IDs: {duplicate_count}"),
            RULE.to_owned(),
        ]
        .join("\n")
    }
}
