use crate::validation::types::{DuplicateInfo, IdMap};

#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateIdDetector;

impl DuplicateIdDetector {
    pub fn new() -> Self {
        Self
    }

    /// Every internal ID owned by more than one workflow, most duplicated first.
    /// Ties keep map order.
    pub fn find_duplicates(&self, id_map: &IdMap) -> Vec<DuplicateInfo> {
        let mut duplicates = id_map
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(internal_id, owners)| DuplicateInfo::new(internal_id.clone(), owners.clone()))
            .collect::<Vec<_>>();

        duplicates.sort_by(|left, right| right.count.cmp(&left.count));
        duplicates
    }

    pub fn is_duplicate(&self, internal_id: &str, id_map: &IdMap) -> bool {
        id_map
            .get(internal_id)
            .is_some_and(|owners| owners.len() > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::DuplicateIdDetector;
    use crate::validation::types::IdMap;

    fn id_map(entries: &[(&str, Vec<&str>)]) -> IdMap {
        entries
            .iter()
            .map(|(id, owners)| {
                (
                    (*id).to_owned(),
                    owners.iter().map(|owner| (*owner).to_owned()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn reports_only_shared_ids_with_full_owner_lists() {
        let map = id_map(&[
            ("(ERR-OUT-001)", vec!["wf-1", "wf-2"]),
            ("(ERR-OUT-002)", vec!["wf-3"]),
        ]);

        let duplicates = DuplicateIdDetector::new().find_duplicates(&map);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].internal_id, "(ERR-OUT-001)");
        assert_eq!(duplicates[0].n8n_ids, vec!["wf-1", "wf-2"]);
        assert_eq!(duplicates[0].count, 2);
    }

    #[test]
    fn sorts_by_count_descending() {
        let map = id_map(&[
            ("(AAA-AAA-001)", vec!["a", "b"]),
            ("(BBB-BBB-001)", vec!["c", "d", "e", "f"]),
            ("(CCC-CCC-001)", vec!["g", "h", "i"]),
        ]);

        let counts = DuplicateIdDetector::new()
            .find_duplicates(&map)
            .iter()
            .map(|duplicate| duplicate.count)
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![4, 3, 2]);
    }

    #[test]
    fn is_duplicate_requires_more_than_one_owner() {
        let map = id_map(&[
            ("(ERR-OUT-001)", vec!["wf-1", "wf-2"]),
            ("(ERR-OUT-002)", vec!["wf-3"]),
        ]);
        let detector = DuplicateIdDetector::new();

        assert!(detector.is_duplicate("(ERR-OUT-001)", &map));
        assert!(!detector.is_duplicate("(ERR-OUT-002)", &map));
        assert!(!detector.is_duplicate("(ERR-OUT-404)", &map));
    }

    #[test]
    fn empty_map_has_no_duplicates() {
        assert!(DuplicateIdDetector::new().find_duplicates(&IdMap::new()).is_empty());
    }
}
