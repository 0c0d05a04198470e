use serde::{Deserialize, Serialize};

use crate::wiki::page::WikiIndex;

/// Reserved candidate value shown while the query is still too short.
pub const START_TYPING: &str = "start_typing";
/// Reserved candidate value shown when nothing matched.
pub const NO_RESULTS: &str = "no_results";

/// Platform UI limit on suggestion choices.
const MAX_CANDIDATES: usize = 25;
/// Queries shorter than this (after trimming) are not matched at all.
const MIN_QUERY_LEN: usize = 3;

/// A suggested wiki page offered during autocomplete.
///
/// `value` is the page path and doubles as the lookup key when the user
/// submits the command — except for the reserved sentinel values, which the
/// dispatcher must refuse to resolve as pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub value: String,
}

impl Candidate {
    fn start_typing() -> Self {
        Self {
            name: "Keep typing to search the wiki...".to_string(),
            value: START_TYPING.to_string(),
        }
    }

    fn no_results() -> Self {
        Self {
            name: "No pages found".to_string(),
            value: NO_RESULTS.to_string(),
        }
    }
}

/// Whether a candidate value is one of the reserved sentinels.
pub fn is_sentinel(value: &str) -> bool {
    value == START_TYPING || value == NO_RESULTS
}

/// Match a partial query against the index.
///
/// Case-insensitive substring match on the case-folded title or any tag, in
/// index order, capped at the platform's suggestion limit. No ranking is
/// performed. Short and unmatched queries yield a single sentinel candidate
/// so the user always sees feedback.
pub fn search(index: &WikiIndex, raw_query: &str) -> Vec<Candidate> {
    let query = raw_query.trim().to_lowercase();

    if query.chars().count() < MIN_QUERY_LEN {
        return vec![Candidate::start_typing()];
    }

    let matches: Vec<Candidate> = index
        .pages()
        .iter()
        .filter(|p| p.lowercase_title.contains(&query) || p.tags.iter().any(|t| t.contains(&query)))
        .take(MAX_CANDIDATES)
        .map(|p| Candidate {
            name: p.title.clone(),
            value: p.path.clone(),
        })
        .collect();

    if matches.is_empty() {
        return vec![Candidate::no_results()];
    }

    matches
}
