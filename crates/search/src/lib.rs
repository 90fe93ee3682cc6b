//! # Lens Search
//!
//! Fuzzy matching and relevance ranking over scanned files.
//!
//! - [`FuzzyMatcher`]: subsequence scoring (nucleo alignment, scaled for
//!   candidate length and match position) plus highlight extraction
//! - [`RelevanceRanker`]: path queries and weighted path/content feature
//!   recommendation
//! - [`DefinitionFinder`]: fuzzy lookup of declared function and type names
//!
//! ```rust
//! use lens_search::RelevanceRanker;
//!
//! let mut ranker = RelevanceRanker::default();
//! let files = ["auth/login.py", "utils/math.py", "auth/signup.py"];
//! let results = ranker.rank_for_query("auth", &files, None);
//!
//! assert_eq!(results.len(), 2);
//! assert!(results.iter().all(|r| r.path.starts_with("auth/")));
//! ```

mod config;
mod definitions;
mod fuzzy;
mod rank;

pub use config::RankingConfig;
pub use definitions::{find_definitions, DefinitionFinder};
pub use fuzzy::{FuzzyMatcher, EMPTY_QUERY_SCORE};
pub use rank::{feature_keywords, FeatureCandidate, RelevanceRanker};
