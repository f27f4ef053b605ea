use std::collections::HashMap;

use crate::{
    models::{Record, SearchHit, SearchResults, Suggestions},
    search,
};

/// Manager owns the loaded test catalog. It is immutable once built and is
/// shared read-only by the HTTP handlers and the CLI.
pub struct Manager {
    records: Vec<Record>,
    ids: HashMap<String, usize>,
}

impl Manager {
    pub fn new(records: Vec<Record>) -> Self {
        let ids = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Self { records, ids }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Get a record by its id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.ids.get(id).map(|&i| &self.records[i])
    }

    // #########################
    // Search

    /// Search the catalog for a committed query.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let results: Vec<SearchHit> = search::search_ranked(&self.records, query)
            .into_iter()
            .map(|(tier, record)| SearchHit { tier, record })
            .collect();

        SearchResults {
            query: query.to_string(),
            total: results.len(),
            results,
        }
    }

    /// Autocomplete suggestions for a partially typed query.
    pub fn suggest(&self, query: &str, max: usize) -> Suggestions<'_> {
        search::suggest(&self.records, query, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{rec, Reason, Tier};

    fn mgr() -> Manager {
        Manager::new(vec![
            rec("hemoglobin", "Hemoglobin", ""),
            rec("hematocrit", "Hematocrit", ""),
            rec("cbc", "CBC", "Hemoglobin Panel"),
        ])
    }

    #[test]
    fn get_by_id() {
        let m = mgr();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get("cbc").map(|r| r.name.as_str()), Some("CBC"));
        assert!(m.get("CBC").is_none());
        assert!(m.get("").is_none());
    }

    #[test]
    fn search_reports_tiers() {
        let m = mgr();
        let res = m.search("Hemoglobin");
        assert_eq!(res.total, 2);
        assert_eq!(res.query, "Hemoglobin");
        assert_eq!(res.results[0].record.id, "hemoglobin");
        assert_eq!(res.results[0].tier, Tier::ExactName);
        assert_eq!(res.results[1].record.id, "cbc");
        assert_eq!(res.results[1].tier, Tier::SynonymPrefix);
    }

    #[test]
    fn suggest_delegates() {
        let m = mgr();
        let out = m.suggest("hem", 2);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.reason == Reason::Name));
    }
}
