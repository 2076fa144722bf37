//! Merging, deduplication and title-match ranking.
//!
//! Merged results are deduplicated by `id`, keeping the first one emitted,
//! so ids are unique within a response even if the store holds duplicates.
//!
//! Ranking is one stable partition: results whose title contains the query
//! move ahead of those that do not, and emission order is kept inside each
//! partition. There is no secondary sort key.

use std::collections::HashSet;

use crate::query::Pattern;
use crate::types::SearchResult;

/// Relevance assigned to results whose title contains the query.
pub const TITLE_MATCH_RELEVANCE: f64 = 1.0;

/// Relevance assigned to every other result.
pub const OTHER_RELEVANCE: f64 = 0.0;

/// Concatenate per-source groups in the order given, dropping repeated ids.
pub fn merge(groups: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    deduplicate(groups.into_iter().flatten().collect())
}

/// Keep the first result for each `id`, preserving emission order.
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| {
            let fresh = seen.insert(result.id.clone());
            if !fresh {
                tracing::debug!(id = %result.id, "dropping duplicate result id");
            }
            fresh
        })
        .collect()
}

/// Stable two-way partition on title match, setting `relevance`.
pub fn rank(results: Vec<SearchResult>, pattern: &Pattern) -> Vec<SearchResult> {
    let (mut title_hits, mut others): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|result| pattern.is_match(&result.title));

    for result in &mut title_hits {
        result.relevance = Some(TITLE_MATCH_RELEVANCE);
    }
    for result in &mut others {
        result.relevance = Some(OTHER_RELEVANCE);
    }

    title_hits.extend(others);
    title_hits
}

/// Truncate to `limit`, returning the pre-truncation count alongside.
pub fn truncate(mut results: Vec<SearchResult>, limit: usize) -> (Vec<SearchResult>, usize) {
    let total = results.len();
    results.truncate(limit);
    (results, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultType;

    fn make_result(id: &str, title: &str, result_type: ResultType) -> SearchResult {
        SearchResult::new(id, title, "", result_type)
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn merge_keeps_group_order() {
        let merged = merge(vec![
            vec![make_result("u1", "a", ResultType::User)],
            vec![],
            vec![
                make_result("c1", "b", ResultType::Course),
                make_result("c2", "c", ResultType::Course),
            ],
        ]);
        assert_eq!(ids(&merged), vec!["u1", "c1", "c2"]);
    }

    #[test]
    fn merge_drops_repeated_ids_keeping_first() {
        let merged = merge(vec![
            vec![
                make_result("course-c1", "Zeta I", ResultType::Course),
                make_result("course-c1", "Zeta II", ResultType::Course),
            ],
            vec![
                make_result("agent-a1", "Zeta bot", ResultType::Agent),
                make_result("course-c1", "Zeta III", ResultType::Course),
            ],
        ]);
        assert_eq!(ids(&merged), vec!["course-c1", "agent-a1"]);
        assert_eq!(merged[0].title, "Zeta I");
    }

    #[test]
    fn deduplicate_keeps_distinct_ids() {
        let results = vec![
            make_result("a", "x", ResultType::User),
            make_result("b", "y", ResultType::User),
        ];
        assert_eq!(ids(&deduplicate(results)), vec!["a", "b"]);
    }

    #[test]
    fn title_matches_move_ahead_stably() {
        let pattern = Pattern::literal("calc").expect("pattern");
        let ranked = rank(
            vec![
                make_result("u1", "Ada", ResultType::User),
                make_result("q1", "MAT Q1 · Calculus", ResultType::Question),
                make_result("c1", "Physics", ResultType::Course),
                make_result("c2", "CALC 101: Calculus I", ResultType::Course),
                make_result("n1", "Dashboard", ResultType::Navigation),
            ],
            &pattern,
        );
        assert_eq!(ids(&ranked), vec!["q1", "c2", "u1", "c1", "n1"]);
        assert_eq!(ranked[0].relevance, Some(TITLE_MATCH_RELEVANCE));
        assert_eq!(ranked[4].relevance, Some(OTHER_RELEVANCE));
    }

    #[test]
    fn ranking_is_independent_of_source() {
        let pattern = Pattern::literal("help").expect("pattern");
        let ranked = rank(
            vec![
                make_result("u1", "Someone", ResultType::User),
                make_result("n1", "Help & Support", ResultType::Navigation),
            ],
            &pattern,
        );
        assert_eq!(ids(&ranked), vec!["n1", "u1"]);
    }

    #[test]
    fn ranking_title_match_is_literal() {
        let pattern = Pattern::literal("a.c").expect("pattern");
        let ranked = rank(
            vec![
                make_result("x", "abc", ResultType::Course),
                make_result("y", "A.C. circuits", ResultType::Course),
            ],
            &pattern,
        );
        assert_eq!(ids(&ranked), vec!["y", "x"]);
    }

    #[test]
    fn truncate_reports_total() {
        let results: Vec<_> = (0..10)
            .map(|i| make_result(&format!("r{i}"), "t", ResultType::Agent))
            .collect();
        let (kept, total) = truncate(results, 4);
        assert_eq!(kept.len(), 4);
        assert_eq!(total, 10);

        let (kept, total) = truncate(vec![], 4);
        assert!(kept.is_empty());
        assert_eq!(total, 0);
    }
}
