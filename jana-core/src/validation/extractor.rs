use regex::Regex;

use crate::config::validate_id_pattern;
use crate::error::Result;
use crate::validation::types::IdMap;
use crate::workflow::Workflow;

/// Pulls the internal ID out of a workflow's name, falling back to its tags.
#[derive(Debug, Clone)]
pub struct InternalIdExtractor {
    pattern: Regex,
}

impl InternalIdExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(validate_id_pattern(pattern)?))
    }

    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn extract_single_id(&self, workflow: &Workflow) -> Option<String> {
        self.match_in(&workflow.name)
            .or_else(|| self.match_in(&workflow.joined_tags()))
    }

    pub fn extract_internal_ids(&self, workflows: &[Workflow]) -> IdMap {
        let mut id_map = IdMap::new();
        for workflow in workflows {
            if let Some(internal_id) = self.extract_single_id(workflow) {
                id_map
                    .entry(internal_id)
                    .or_default()
                    .push(workflow.id.clone());
            }
        }
        id_map
    }

    fn match_in(&self, haystack: &str) -> Option<String> {
        if haystack.is_empty() {
            return None;
        }
        // Patterns that can match the empty string would otherwise tag everything.
        self.pattern
            .find_iter(haystack)
            .map(|found| found.as_str().trim())
            .find(|candidate| !candidate.is_empty())
            .map(str::to_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::InternalIdExtractor;
    use crate::config::schema::DEFAULT_ID_PATTERN;
    use crate::workflow::Workflow;

    fn extractor() -> InternalIdExtractor {
        InternalIdExtractor::new(DEFAULT_ID_PATTERN).expect("default pattern compiles")
    }

    #[test]
    fn prefers_name_over_tags() {
        let workflow =
            Workflow::new("wf-1", "(ERR-OUT-001) Handler").with_tags(["(ERR-OUT-009)"]);
        assert_eq!(
            extractor().extract_single_id(&workflow).as_deref(),
            Some("(ERR-OUT-001)")
        );
    }

    #[test]
    fn falls_back_to_joined_tags() {
        let workflow = Workflow::new("wf-1", "Handler").with_tags(["ops", "(BCK-IMP-014)"]);
        assert_eq!(
            extractor().extract_single_id(&workflow).as_deref(),
            Some("(BCK-IMP-014)")
        );
    }

    #[test]
    fn uppercases_case_insensitive_matches() {
        let extractor = InternalIdExtractor::new(r"(?i)\([a-z]+-[a-z]+-\d{3}\)").expect("compile");
        let workflow = Workflow::new("wf-1", "(err-out-001) lower");
        assert_eq!(
            extractor.extract_single_id(&workflow).as_deref(),
            Some("(ERR-OUT-001)")
        );
    }

    #[test]
    fn untagged_workflows_are_skipped() {
        let workflows = vec![
            Workflow::new("wf-1", "Random Workflow"),
            Workflow::default(),
            Workflow::new("wf-2", "(ERR-OUT-001) A"),
        ];

        let id_map = extractor().extract_internal_ids(&workflows);
        assert_eq!(id_map.len(), 1);
        assert_eq!(id_map["(ERR-OUT-001)"], vec!["wf-2".to_owned()]);
    }

    #[test]
    fn owners_keep_input_order() {
        let workflows = vec![
            Workflow::new("wf-3", "(ERR-OUT-001) C"),
            Workflow::new("wf-1", "(ERR-OUT-001) A"),
            Workflow::new("wf-2", "B").with_tags(["(ERR-OUT-001)"]),
        ];

        let id_map = extractor().extract_internal_ids(&workflows);
        assert_eq!(id_map["(ERR-OUT-001)"], vec!["wf-3", "wf-1", "wf-2"]);
    }

    #[test]
    fn empty_matches_are_ignored() {
        let extractor = InternalIdExtractor::new(r"\d*").expect("compile");
        assert_eq!(extractor.extract_single_id(&Workflow::new("wf-1", "abc")), None);
    }
}
