use serde::Serialize;

use super::{normalize, normalized_synonyms};
use crate::models::Record;

/// Relevance tier of a record for a query. Lower is better.
/// Variant order is the ranking order; `NoMatch` sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    ExactName,
    ExactSynonym,
    NamePrefix,
    SynonymPrefix,
    NameContains,
    SynonymContains,
    NoMatch,
}

impl Tier {
    /// Numeric rank, 0 (best) to 5. `NoMatch` is `u8::MAX`.
    pub fn rank(self) -> u8 {
        match self {
            Tier::ExactName => 0,
            Tier::ExactSynonym => 1,
            Tier::NamePrefix => 2,
            Tier::SynonymPrefix => 3,
            Tier::NameContains => 4,
            Tier::SynonymContains => 5,
            Tier::NoMatch => u8::MAX,
        }
    }

    pub fn is_match(self) -> bool {
        self != Tier::NoMatch
    }
}

impl Serialize for Tier {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(self.rank())
    }
}

/// Rank a record against an already normalized query.
///
/// Rules are checked in order and the first one that holds wins:
/// exact name, exact synonym, name prefix, synonym prefix, name substring,
/// synonym substring.
pub fn rank(r: &Record, q: &str) -> Tier {
    if q.is_empty() {
        return Tier::NoMatch;
    }

    let name = normalize(&r.name);
    let syns = normalized_synonyms(r);

    if name == q {
        return Tier::ExactName;
    }
    if syns.iter().any(|s| s == q) {
        return Tier::ExactSynonym;
    }

    if name.starts_with(q) {
        return Tier::NamePrefix;
    }
    if syns.iter().any(|s| s.starts_with(q)) {
        return Tier::SynonymPrefix;
    }

    if name.contains(q) {
        return Tier::NameContains;
    }
    if syns.iter().any(|s| s.contains(q)) {
        return Tier::SynonymContains;
    }

    Tier::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::rec;

    #[test]
    fn tiers_follow_precedence() {
        let r = rec("fbc", "Full Blood Count", "FBC|CBC|Complete Blood Count");

        assert_eq!(rank(&r, "full blood count"), Tier::ExactName);
        assert_eq!(rank(&r, "cbc"), Tier::ExactSynonym);
        assert_eq!(rank(&r, "full"), Tier::NamePrefix);
        assert_eq!(rank(&r, "complete"), Tier::SynonymPrefix);
        assert_eq!(rank(&r, "blood"), Tier::NameContains);
        assert_eq!(rank(&r, "lete blood"), Tier::SynonymContains);
        assert_eq!(rank(&r, "ferritin"), Tier::NoMatch);
    }

    #[test]
    fn name_wins_at_equal_strength() {
        // "blood" is a substring of the name and a prefix of a synonym.
        // Synonym prefix (3) beats name substring (4).
        let r = rec("x", "Whole blood", "Blood film");
        assert_eq!(rank(&r, "blood"), Tier::SynonymPrefix);

        // Exact name and exact synonym both hold; name wins.
        let r = rec("y", "ESR", "esr");
        assert_eq!(rank(&r, "esr"), Tier::ExactName);
    }

    #[test]
    fn empty_query_is_no_match() {
        let r = rec("x", "Anything", "");
        assert_eq!(rank(&r, ""), Tier::NoMatch);
    }

    #[test]
    fn exact_name_implies_equal_normalized_name() {
        let r = rec("x", "  Vitamin D ", "");
        for q in ["vitamin d", "vitamin", "d", "VITAMIN D"] {
            let qn = normalize(q);
            if rank(&r, &qn) == Tier::ExactName {
                assert_eq!(normalize(&r.name), qn);
            }
        }
        assert_eq!(rank(&r, &normalize("VITAMIN D")), Tier::ExactName);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::ExactName < Tier::ExactSynonym);
        assert!(Tier::SynonymContains < Tier::NoMatch);
        assert_eq!(Tier::NameContains.rank(), 4);
        assert!(!Tier::NoMatch.is_match());
        assert_eq!(serde_json::to_string(&Tier::SynonymPrefix).unwrap(), "3");
    }
}
