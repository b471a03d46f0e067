//! Fuzzy scoring and ranking over candidate lists.
//!
//! Pure functions: rank a slice against a query, return indices into the
//! original slice with scores and matched-character byte positions for
//! highlighting. Nothing here touches component state or the terminal.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// One candidate that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    /// Index into the original candidate slice.
    pub index: usize,
    /// Match score (higher = better). None for the empty-query listing.
    pub score: Option<u32>,
    /// Byte indices of matched characters within the projected text.
    pub indices: Vec<usize>,
}

/// Ranks `items` against `query`, best match first.
///
/// The empty query is a defined special case: every item is returned in its
/// original order, unscored and unfiltered. For a non-empty query the
/// query's characters must appear in order (case-insensitively) in
/// `text_of(item)`; items without such a subsequence are excluded.
/// Contiguous runs and matches at word boundaries score higher. Equal
/// scores keep the original relative order (stable sort).
pub fn rank<T>(items: &[T], query: &str, text_of: impl Fn(&T) -> String) -> Vec<ScoredMatch> {
    if query.is_empty() {
        return identity_listing(items.len());
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    let mut matches: Vec<ScoredMatch> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let text = text_of(item);
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&text, &mut buf);

            pattern.score(haystack, &mut matcher).map(|score| {
                let mut char_indices = Vec::new();
                pattern.indices(haystack, &mut matcher, &mut char_indices);
                ScoredMatch {
                    index,
                    score: Some(score),
                    indices: char_to_byte_indices(&text, &char_indices),
                }
            })
        })
        .collect();

    // sort_by_key is stable: ties keep candidate order.
    matches.sort_by_key(|m| std::cmp::Reverse(m.score.unwrap_or(0)));
    matches
}

/// The unfiltered listing used for an empty query.
pub fn identity_listing(len: usize) -> Vec<ScoredMatch> {
    (0..len)
        .map(|index| ScoredMatch {
            index,
            score: None,
            indices: Vec::new(),
        })
        .collect()
}

/// Converts character indices to byte indices.
///
/// Nucleo reports character positions, but highlighting works on byte
/// offsets into the projected string.
fn char_to_byte_indices(text: &str, char_indices: &[u32]) -> Vec<usize> {
    if char_indices.is_empty() {
        return Vec::new();
    }

    let char_set: std::collections::HashSet<u32> = char_indices.iter().copied().collect();
    let mut byte_indices = Vec::with_capacity(char_indices.len());
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        if char_set.contains(&(char_idx as u32)) {
            byte_indices.push(byte_idx);
        }
    }
    byte_indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str], query: &str) -> Vec<String> {
        rank(items, query, |s| (*s).to_string())
            .into_iter()
            .map(|m| items[m.index].to_string())
            .collect()
    }

    /// Checks the in-order subsequence property the matcher guarantees.
    fn is_subsequence(query: &str, text: &str) -> bool {
        let text_lower = text.to_lowercase();
        let mut chars = text_lower.chars();
        query
            .to_lowercase()
            .chars()
            .all(|q| chars.any(|t| t == q))
    }

    #[test]
    fn test_empty_query_is_identity() {
        let items = ["bravo", "alpha", "charlie"];
        let ranked = rank(&items, "", |s| (*s).to_string());
        let indices: Vec<usize> = ranked.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(ranked.iter().all(|m| m.score.is_none()));
        assert!(ranked.iter().all(|m| m.indices.is_empty()));
    }

    #[test]
    fn test_non_matching_candidates_are_excluded() {
        let items = ["claude-haiku", "gpt-5", "gemini-flash"];
        assert_eq!(names(&items, "xyz"), Vec::<String>::new());
        assert_eq!(names(&items, "haiku"), vec!["claude-haiku"]);
    }

    #[test]
    fn test_every_result_satisfies_subsequence_property() {
        let items = [
            "claude-opus-4-6",
            "claude-sonnet-4-5",
            "gpt-5-mini",
            "gemini-3-pro",
        ];
        for query in ["cl", "c5", "ge3", "mini", "son"] {
            for m in rank(&items, query, |s| (*s).to_string()) {
                assert!(
                    is_subsequence(query, items[m.index]),
                    "{query:?} not a subsequence of {:?}",
                    items[m.index]
                );
            }
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let items = ["Claude Haiku"];
        assert_eq!(names(&items, "claude"), vec!["Claude Haiku"]);
        assert_eq!(names(&items, "HAIKU"), vec!["Claude Haiku"]);
    }

    #[test]
    fn test_direct_match_ranks_above_scattered() {
        let items = ["deeply/nested/config.toml", "config.toml"];
        let ranked = names(&items, "config");
        assert_eq!(ranked[0], "config.toml");
    }

    #[test]
    fn test_ranking_is_deterministic_and_stable() {
        let items = ["alpha-one", "alpha-two", "alpha-three"];
        let first = names(&items, "alpha");
        let second = names(&items, "alpha");
        assert_eq!(first, second);
        // Equal scores keep original relative order.
        assert_eq!(first, vec!["alpha-one", "alpha-two", "alpha-three"]);
    }

    #[test]
    fn test_indices_point_at_matched_bytes() {
        let items = ["claude-x"];
        let ranked = rank(&items, "cx", |s| (*s).to_string());
        assert_eq!(ranked.len(), 1);
        let indices = &ranked[0].indices;
        assert!(indices.contains(&0)); // 'c'
        assert!(indices.contains(&7)); // 'x'
    }
}
