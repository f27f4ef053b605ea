use std::collections::HashSet;

use serde::Serialize;

use super::{normalize, normalized_synonyms};
use crate::models::Record;

/// Default number of autocomplete suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Upper bound on suggestions a single request may ask for.
pub const MAX_SUGGESTIONS_LIMIT: usize = 20;

/// Which pass produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    /// Name starts with the query.
    Name,
    /// Name contains the query.
    Match,
    /// A synonym starts with the query.
    Synonym,
}

/// Autocomplete candidate.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion<'a> {
    pub reason: Reason,
    pub record: &'a Record,
}

/// Build up to `max` autocomplete suggestions for a partially typed query.
///
/// Runs three passes over the records in their natural order: name prefix,
/// then name substring, then synonym prefix. A record picked in an earlier
/// pass is never repeated.
pub fn suggest<'a>(records: &'a [Record], query: &str, max: usize) -> Vec<Suggestion<'a>> {
    let q = normalize(query);
    if q.is_empty() || max == 0 {
        return Vec::new();
    }

    let passes: [(Reason, &dyn Fn(&Record) -> bool); 3] = [
        (Reason::Name, &|r: &Record| normalize(&r.name).starts_with(&q)),
        (Reason::Match, &|r: &Record| normalize(&r.name).contains(&q)),
        (Reason::Synonym, &|r: &Record| {
            normalized_synonyms(r).iter().any(|s| s.starts_with(&q))
        }),
    ];

    let mut out: Vec<Suggestion> = Vec::with_capacity(max);
    let mut picked: HashSet<&str> = HashSet::new();

    for (reason, matches) in passes {
        for r in records {
            if out.len() >= max {
                return out;
            }
            if picked.contains(r.id.as_str()) || !matches(r) {
                continue;
            }

            picked.insert(r.id.as_str());
            out.push(Suggestion { reason, record: r });
        }
    }

    out
}
