use lens_protocol::{Highlight, MatchScore};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Score given to every candidate when the query is empty.
pub const EMPTY_QUERY_SCORE: MatchScore = 1.0;

/// Per unmatched candidate character.
const LENGTH_PENALTY: f64 = 0.01;
/// Per character before the first match.
const POSITION_PENALTY: f64 = 0.02;

/// A successful alignment: score plus matched char indices into the candidate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Alignment {
    pub score: MatchScore,
    pub indices: Vec<usize>,
}

/// Subsequence fuzzy matcher backed by nucleo-matcher.
///
/// Every query character must occur in the candidate in order. nucleo's
/// alignment score (contiguity and word-boundary bonuses) is scaled down for
/// longer candidates and for matches that start later. Non-matches score
/// `0.0`. The matcher does no case folding of its own in [`score`]; callers
/// normalise both sides first.
///
/// [`score`]: FuzzyMatcher::score
pub struct FuzzyMatcher {
    matcher: Matcher,
    haystack_buf: Vec<char>,
    needle_buf: Vec<char>,
    indices: Vec<u32>,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        let mut config = Config::DEFAULT;
        config.ignore_case = false;
        config.normalize = false;
        Self {
            matcher: Matcher::new(config),
            haystack_buf: Vec::new(),
            needle_buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Relevance of `candidate` for `query`; `0.0` when `query` is not a
    /// subsequence of `candidate`.
    pub fn score(&mut self, query: &str, candidate: &str) -> MatchScore {
        self.align(query, candidate).map_or(0.0, |alignment| alignment.score)
    }

    /// Case-insensitively mark the characters of `candidate` that `query`
    /// matched. The returned text keeps the candidate's original case.
    pub fn highlight(&mut self, candidate: &str, query: &str) -> Highlight {
        let (folded, origin) = fold_case(candidate);
        match self.align(&query.to_lowercase(), &folded) {
            Some(alignment) => project(candidate, &alignment, &origin),
            None => Highlight::plain(candidate),
        }
    }

    /// `score(q, c) / score(q, q)`, clamped to `[0, 1]`.
    pub fn similarity(&mut self, query: &str, candidate: &str) -> f64 {
        let perfect = self.score(query, query);
        if perfect <= 0.0 {
            return 0.0;
        }
        (self.score(query, candidate) / perfect).min(1.0)
    }

    pub(crate) fn align(&mut self, query: &str, candidate: &str) -> Option<Alignment> {
        if query.is_empty() {
            return Some(Alignment {
                score: EMPTY_QUERY_SCORE,
                indices: Vec::new(),
            });
        }
        if candidate.is_empty() {
            return None;
        }

        let haystack = Utf32Str::new(candidate, &mut self.haystack_buf);
        let needle = Utf32Str::new(query, &mut self.needle_buf);
        let slack = haystack.len().saturating_sub(needle.len());

        self.indices.clear();
        let raw = self
            .matcher
            .fuzzy_indices(haystack, needle, &mut self.indices)?;

        let mut indices: Vec<usize> = self.indices.iter().map(|&idx| idx as usize).collect();
        indices.sort_unstable();
        indices.dedup();
        let first = indices.first().copied().unwrap_or(0);

        let length_factor = 1.0 + slack as f64 * LENGTH_PENALTY;
        let position_factor = 1.0 + first as f64 * POSITION_PENALTY;
        let score = (f64::from(raw) + 1.0) / (length_factor * position_factor);

        Some(Alignment { score, indices })
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case `text`, remembering which original char each folded char
/// came from (some chars fold to more than one).
pub(crate) fn fold_case(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (idx, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(idx);
        }
    }
    (folded, origin)
}

/// Map folded-text indices back onto the original text.
pub(crate) fn project(original: &str, alignment: &Alignment, origin: &[usize]) -> Highlight {
    let matched = alignment
        .indices
        .iter()
        .filter_map(|&idx| origin.get(idx).copied())
        .collect();
    Highlight::new(original, matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_subsequence(query: &str, candidate: &str) -> bool {
        let mut rest = candidate.chars();
        query.chars().all(|q| rest.any(|c| c == q))
    }

    #[test]
    fn test_subsequence_matches_and_misses() {
        let mut fuzzy = FuzzyMatcher::new();
        assert!(fuzzy.score("auth", "auth/login.py") > 0.0);
        assert!(fuzzy.score("alp", "auth/login.py") > 0.0);
        assert_eq!(fuzzy.score("auth", "utils/math.py"), 0.0);
        assert_eq!(fuzzy.score("zz", "auth/login.py"), 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let mut fuzzy = FuzzyMatcher::new();
        assert_eq!(fuzzy.score("", "anything"), EMPTY_QUERY_SCORE);
        assert_eq!(fuzzy.score("", ""), EMPTY_QUERY_SCORE);
        assert_eq!(fuzzy.score("a", ""), 0.0);
    }

    #[test]
    fn test_no_case_folding_in_score() {
        let mut fuzzy = FuzzyMatcher::new();
        assert_eq!(fuzzy.score("readme", "README.md"), 0.0);
        assert!(fuzzy.score("readme", "readme.md") > 0.0);
    }

    #[test]
    fn test_contiguous_beats_scattered() {
        let mut fuzzy = FuzzyMatcher::new();
        let contiguous = fuzzy.score("login", "src/login_view.py");
        let scattered = fuzzy.score("login", "src/lxoxgxixn_view.py");
        assert!(contiguous > scattered, "{contiguous} <= {scattered}");
    }

    #[test]
    fn test_shorter_candidate_wins() {
        let mut fuzzy = FuzzyMatcher::new();
        let short = fuzzy.score("config", "config.py");
        let long = fuzzy.score("config", "config_loader_with_many_extra_parts.py");
        assert!(short > long, "{short} <= {long}");
    }

    #[test]
    fn test_earlier_match_wins() {
        let mut fuzzy = FuzzyMatcher::new();
        let early = fuzzy.score("db", "db_x_yyyyyyyy");
        let late = fuzzy.score("db", "yyyyyyyy_x_db");
        assert!(early > late, "{early} <= {late}");
    }

    #[test]
    fn test_deterministic() {
        let mut a = FuzzyMatcher::new();
        let mut b = FuzzyMatcher::new();
        for _ in 0..3 {
            assert_eq!(
                a.score("usrctl", "src/user/controller.rs"),
                b.score("usrctl", "src/user/controller.rs")
            );
        }
    }

    #[test]
    fn test_highlight_keeps_original_case() {
        let mut fuzzy = FuzzyMatcher::new();
        let highlight = fuzzy.highlight("Auth/Login.py", "AUTH");
        assert_eq!(highlight.text, "Auth/Login.py");
        assert_eq!(highlight.matched, vec![0, 1, 2, 3]);
        assert_eq!(highlight.to_string(), "[Auth]/Login.py");
    }

    #[test]
    fn test_highlight_without_match_is_plain() {
        let mut fuzzy = FuzzyMatcher::new();
        let highlight = fuzzy.highlight("utils/math.py", "auth");
        assert!(highlight.matched.is_empty());
        assert_eq!(highlight.to_string(), "utils/math.py");
    }

    #[test]
    fn test_fold_case_tracks_expanding_chars() {
        let (folded, origin) = fold_case("İx");
        assert_eq!(folded.chars().count(), origin.len());
        assert_eq!(*origin.last().unwrap(), 1);
    }

    #[test]
    fn test_similarity_is_bounded() {
        let mut fuzzy = FuzzyMatcher::new();
        assert_eq!(fuzzy.similarity("login", "login"), 1.0);
        let partial = fuzzy.similarity("login", "login_user");
        assert!(partial > 0.0 && partial < 1.0);
        assert_eq!(fuzzy.similarity("login", "logout"), 0.0);
        assert_eq!(fuzzy.similarity("", "x"), 1.0);
    }

    proptest! {
        #[test]
        fn proptest_score_positive_iff_subsequence(
            query in "[a-z0-9_./-]{1,8}",
            candidate in "[a-z0-9_./-]{0,48}",
        ) {
            let mut fuzzy = FuzzyMatcher::new();
            let score = fuzzy.score(&query, &candidate);
            prop_assert!(score >= 0.0);
            prop_assert_eq!(score > 0.0, is_subsequence(&query, &candidate));
        }

        #[test]
        fn proptest_picked_subsequence_always_matches(
            candidate in "[a-z0-9_./-]{1,48}",
            mask in proptest::collection::vec(any::<bool>(), 48),
        ) {
            let mut query: String = candidate
                .chars()
                .zip(mask.iter())
                .filter_map(|(ch, keep)| keep.then_some(ch))
                .collect();
            if query.is_empty() {
                query.push(candidate.chars().next().unwrap());
            }
            let mut fuzzy = FuzzyMatcher::new();
            prop_assert!(fuzzy.score(&query, &candidate) > 0.0);
        }

        #[test]
        fn proptest_empty_query_scores_baseline(candidate in "\\PC{1,40}") {
            let mut fuzzy = FuzzyMatcher::new();
            prop_assert!(fuzzy.score("", &candidate) > 0.0);
        }

        #[test]
        fn proptest_highlight_indices_are_in_bounds(
            query in "[a-zA-Z]{1,6}",
            candidate in "[a-zA-Z/_.]{0,40}",
        ) {
            let mut fuzzy = FuzzyMatcher::new();
            let highlight = fuzzy.highlight(&candidate, &query);
            let len = candidate.chars().count();
            prop_assert!(highlight.matched.iter().all(|&idx| idx < len));
            prop_assert!(highlight.matched.is_empty() || highlight.matched.len() == query.chars().count());
        }
    }
}
