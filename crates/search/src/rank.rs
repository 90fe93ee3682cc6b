use crate::config::RankingConfig;
use crate::fuzzy::{fold_case, project, FuzzyMatcher};
use lens_indexer::{char_prefix, CodeFile};
use lens_protocol::{sort_by_score_desc, MatchScore, ScoredResult};

/// A file as seen by feature recommendation: its path and the head of its
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCandidate {
    pub path: String,
    pub content: String,
}

impl FeatureCandidate {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read the first `prefix_chars` characters of `file`. Unreadable files
    /// contribute empty content.
    pub fn from_file(file: &CodeFile, prefix_chars: usize) -> Self {
        let text = file.read_text();
        Self::new(file.relative.clone(), char_prefix(&text, prefix_chars))
    }
}

/// Lower-cased, whitespace-separated keywords of a feature description.
pub fn feature_keywords(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Ranks files against a path query or a feature description.
pub struct RelevanceRanker {
    matcher: FuzzyMatcher,
    config: RankingConfig,
}

impl RelevanceRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            matcher: FuzzyMatcher::new(),
            config,
        }
    }

    /// Fuzzy path search. Case-insensitive; zero scores are dropped; results
    /// are sorted by score descending with discovery order kept for ties and
    /// carry a highlight of the matched path characters.
    pub fn rank_for_query<S: AsRef<str>>(
        &mut self,
        query: &str,
        paths: &[S],
        limit: Option<usize>,
    ) -> Vec<ScoredResult> {
        let query = query.to_lowercase();
        let mut results = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let (folded, origin) = fold_case(path);
            let Some(alignment) = self.matcher.align(&query, &folded) else {
                continue;
            };
            if alignment.score <= 0.0 {
                continue;
            }
            let highlight = project(path, &alignment, &origin);
            results.push(ScoredResult::new(alignment.score, path).with_highlight(highlight));
        }

        sort_by_score_desc(&mut results);
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        log::debug!("Path query {query:?} matched {} file(s)", results.len());
        results
    }

    /// Feature recommendation over pre-read candidates.
    ///
    /// Per keyword, the path score is weighted by `path_weight` and the
    /// content-prefix score by `content_weight`; a file's total is the sum
    /// over all keywords and both signals. Files totalling zero are dropped
    /// and the best `recommend_limit` are returned.
    pub fn rank_for_feature(
        &mut self,
        keywords: &[String],
        candidates: &[FeatureCandidate],
    ) -> Vec<ScoredResult> {
        let mut results = Vec::new();
        for candidate in candidates {
            let total = self.feature_score(keywords, candidate);
            if total > 0.0 {
                results.push(ScoredResult::new(total, candidate.path.clone()));
            }
        }

        sort_by_score_desc(&mut results);
        results.truncate(self.config.recommend_limit);
        results
    }

    /// Recommend files from `files` for a free-text feature description.
    pub fn recommend(&mut self, description: &str, files: &[CodeFile]) -> Vec<ScoredResult> {
        let keywords = feature_keywords(description);
        if keywords.is_empty() {
            return Vec::new();
        }
        let candidates: Vec<FeatureCandidate> = files
            .iter()
            .map(|file| FeatureCandidate::from_file(file, self.config.content_prefix_chars))
            .collect();
        self.rank_for_feature(&keywords, &candidates)
    }

    /// Path search over scanned files.
    pub fn search_files(
        &mut self,
        query: &str,
        files: &[CodeFile],
        limit: Option<usize>,
    ) -> Vec<ScoredResult> {
        let paths: Vec<&str> = files.iter().map(|file| file.relative.as_str()).collect();
        self.rank_for_query(query, &paths, limit)
    }

    fn feature_score(&mut self, keywords: &[String], candidate: &FeatureCandidate) -> MatchScore {
        let path = candidate.path.to_lowercase();
        let content = char_prefix(&candidate.content, self.config.content_prefix_chars).to_lowercase();

        keywords
            .iter()
            .map(|keyword| {
                let path_score = self.matcher.score(keyword, &path) * self.config.path_weight;
                let content_score =
                    self.matcher.score(keyword, &content) * self.config.content_weight;
                path_score + content_score
            })
            .sum()
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}
