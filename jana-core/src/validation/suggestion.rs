use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::validation::types::{DuplicateInfo, EnrichedDuplicateInfo, IdMap};

/// Highest sequence number a three-digit ID can carry.
pub const MAX_SEQUENCE: u32 = 999;
pub const MAX_SUGGESTIONS_PER_GROUP: usize = 3;

fn canonical_id() -> Option<&'static Regex> {
    static CANONICAL: OnceLock<Option<Regex>> = OnceLock::new();
    CANONICAL
        .get_or_init(|| Regex::new(r"^\(([A-Z]+-[A-Z]+)-(\d{3})\)$").ok())
        .as_ref()
}

/// Proposes replacement IDs for duplicates of the `(PREFIX-SUB-NNN)` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdSuggestionEngine;

impl IdSuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    /// First free number after the current one, so gaps fill before the
    /// sequence grows. `None` for other ID shapes or once 999 is reached.
    pub fn suggest_next_id(&self, internal_id: &str, used_ids: &HashSet<String>) -> Option<String> {
        let captures = canonical_id()?.captures(internal_id)?;
        let prefix = captures.get(1)?.as_str();
        let current = captures.get(2)?.as_str().parse::<u32>().ok()?;

        (current + 1..=MAX_SEQUENCE)
            .map(|number| format!("({prefix}-{number:03})"))
            .find(|candidate| !used_ids.contains(candidate))
    }

    pub fn enrich_with_suggestions(
        &self,
        duplicates: &[DuplicateInfo],
        id_map: &IdMap,
    ) -> Vec<EnrichedDuplicateInfo> {
        self.enrich_first(duplicates, id_map, usize::MAX)
    }

    /// Like [`Self::enrich_with_suggestions`], but only the first `limit` groups
    /// get suggestions; the rest are returned with none.
    pub fn enrich_first(
        &self,
        duplicates: &[DuplicateInfo],
        id_map: &IdMap,
        limit: usize,
    ) -> Vec<EnrichedDuplicateInfo> {
        // Shared across groups so two groups never get the same replacement.
        let mut used_ids = id_map.keys().cloned().collect::<HashSet<_>>();

        duplicates
            .iter()
            .enumerate()
            .map(|(index, duplicate)| {
                let suggestions = if index < limit {
                    self.suggestions_for(duplicate, &mut used_ids)
                } else {
                    Vec::new()
                };
                EnrichedDuplicateInfo {
                    duplicate: duplicate.clone(),
                    suggestions,
                }
            })
            .collect()
    }

    fn suggestions_for(
        &self,
        duplicate: &DuplicateInfo,
        used_ids: &mut HashSet<String>,
    ) -> Vec<String> {
        let wanted = duplicate
            .count
            .saturating_sub(1)
            .min(MAX_SUGGESTIONS_PER_GROUP);

        let mut suggestions = Vec::with_capacity(wanted);
        while suggestions.len() < wanted {
            let Some(next) = self.suggest_next_id(&duplicate.internal_id, used_ids) else {
                break;
            };
            used_ids.insert(next.clone());
            suggestions.push(next);
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::IdSuggestionEngine;
    use crate::validation::types::{DuplicateInfo, IdMap};

    fn used(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    fn owners(count: usize) -> Vec<String> {
        (1..=count).map(|index| format!("wf-{index}")).collect()
    }

    #[test]
    fn fills_gap_before_extending() {
        let engine = IdSuggestionEngine::new();
        let suggestion =
            engine.suggest_next_id("(ERR-OUT-001)", &used(&["(ERR-OUT-001)", "(ERR-OUT-003)"]));
        assert_eq!(suggestion.as_deref(), Some("(ERR-OUT-002)"));
    }

    #[test]
    fn skips_used_numbers() {
        let engine = IdSuggestionEngine::new();
        let suggestion = engine.suggest_next_id(
            "(ERR-OUT-001)",
            &used(&["(ERR-OUT-001)", "(ERR-OUT-002)", "(ERR-OUT-003)"]),
        );
        assert_eq!(suggestion.as_deref(), Some("(ERR-OUT-004)"));
    }

    #[test]
    fn unrecognized_shapes_get_no_suggestion() {
        let engine = IdSuggestionEngine::new();
        assert_eq!(engine.suggest_next_id("[CUSTOM-42]", &HashSet::new()), None);
        assert_eq!(engine.suggest_next_id("(ERR-0001)", &HashSet::new()), None);
    }

    #[test]
    fn stops_at_the_three_digit_ceiling() {
        let engine = IdSuggestionEngine::new();
        assert_eq!(engine.suggest_next_id("(ERR-OUT-999)", &HashSet::new()), None);
        assert_eq!(
            engine.suggest_next_id("(ERR-OUT-998)", &used(&["(ERR-OUT-999)"])),
            None
        );
    }

    #[test]
    fn caps_suggestions_at_three() {
        let mut id_map = IdMap::new();
        id_map.insert("(ERR-OUT-001)".to_owned(), owners(6));
        let duplicates = vec![DuplicateInfo::new("(ERR-OUT-001)", owners(6))];

        let enriched = IdSuggestionEngine::new().enrich_with_suggestions(&duplicates, &id_map);
        assert_eq!(
            enriched[0].suggestions,
            vec!["(ERR-OUT-002)", "(ERR-OUT-003)", "(ERR-OUT-004)"]
        );
    }

    #[test]
    fn suggestions_avoid_used_ids_and_each_other() {
        let mut id_map = IdMap::new();
        id_map.insert("(ERR-OUT-001)".to_owned(), owners(3));
        id_map.insert("(ERR-OUT-003)".to_owned(), owners(3));
        id_map.insert("(ERR-OUT-005)".to_owned(), vec!["wf-9".to_owned()]);
        let duplicates = vec![
            DuplicateInfo::new("(ERR-OUT-001)", owners(3)),
            DuplicateInfo::new("(ERR-OUT-003)", owners(3)),
        ];

        let enriched = IdSuggestionEngine::new().enrich_with_suggestions(&duplicates, &id_map);
        assert_eq!(enriched[0].suggestions, vec!["(ERR-OUT-002)", "(ERR-OUT-004)"]);
        assert_eq!(enriched[1].suggestions, vec!["(ERR-OUT-006)", "(ERR-OUT-007)"]);
        assert_eq!(id_map.len(), 3);
    }

    #[test]
    fn groups_past_the_limit_get_no_suggestions() {
        let mut id_map = IdMap::new();
        id_map.insert("(ERR-OUT-001)".to_owned(), owners(2));
        id_map.insert("(ERR-OUT-010)".to_owned(), owners(2));
        let duplicates = vec![
            DuplicateInfo::new("(ERR-OUT-001)", owners(2)),
            DuplicateInfo::new("(ERR-OUT-010)", owners(2)),
        ];

        let enriched = IdSuggestionEngine::new().enrich_first(&duplicates, &id_map, 1);
        assert_eq!(enriched[0].suggestions, vec!["(ERR-OUT-002)"]);
        assert!(enriched[1].suggestions.is_empty());
    }

    #[test]
    fn unrecognized_groups_are_enriched_with_no_suggestions() {
        let mut id_map = IdMap::new();
        id_map.insert("[OPS-7]".to_owned(), owners(3));
        let duplicates = vec![DuplicateInfo::new("[OPS-7]", owners(3))];

        let enriched = IdSuggestionEngine::new().enrich_with_suggestions(&duplicates, &id_map);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].count(), 3);
        assert!(enriched[0].suggestions.is_empty());
    }
}
