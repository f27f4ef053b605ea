mod rank;
mod suggest;

pub use rank::{rank, Tier};
pub use suggest::{suggest, Reason, Suggestion, DEFAULT_MAX_SUGGESTIONS, MAX_SUGGESTIONS_LIMIT};

use crate::models::Record;

/// Normalize text for comparison: lowercase and trim surrounding whitespace.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

/// Split a pipe-separated synonym field into trimmed, non-empty names.
/// Source order is kept and duplicates are not removed.
pub fn tokenize_synonyms(s: &str) -> Vec<&str> {
    s.split('|')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalized synonym tokens of a record.
pub(crate) fn normalized_synonyms(r: &Record) -> Vec<String> {
    tokenize_synonyms(&r.synonyms)
        .into_iter()
        .map(normalize)
        .collect()
}

/// Search records and return the matches with their tiers, best first.
/// Within a tier, records are ordered by case-insensitive name.
pub fn search_ranked<'a>(records: &'a [Record], query: &str) -> Vec<(Tier, &'a Record)> {
    let q = normalize(query);
    if q.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<(Tier, &Record, String)> = records
        .iter()
        .filter_map(|r| {
            let tier = rank(r, &q);
            tier.is_match().then(|| (tier, r, normalize(&r.name)))
        })
        .collect();

    // sort_by is stable, so equal tier + name keep record order.
    out.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(&b.2)));

    out.into_iter().map(|(tier, r, _)| (tier, r)).collect()
}

/// Search records for a committed query. See [`search_ranked`].
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    search_ranked(records, query)
        .into_iter()
        .map(|(_, r)| r)
        .collect()
}

#[cfg(test)]
pub(crate) fn rec(id: &str, name: &str, synonyms: &str) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        synonyms: synonyms.to_string(),
        ..Default::default()
    }
}
