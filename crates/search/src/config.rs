use serde::{Deserialize, Serialize};

/// Weights and caps for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Multiplier for keyword matches against the relative path
    pub path_weight: f64,

    /// Multiplier for keyword matches against the content prefix
    pub content_weight: f64,

    /// Only this many leading characters of a file are matched
    pub content_prefix_chars: usize,

    /// Number of files a feature recommendation returns
    pub recommend_limit: usize,

    /// A definition lookup hit needs a name similarity strictly above this,
    /// in [0, 1)
    pub definition_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            path_weight: 3.0,
            content_weight: 2.0,
            content_prefix_chars: 1000,
            recommend_limit: 5,
            definition_threshold: 0.7,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in [
            ("path_weight", self.path_weight),
            ("content_weight", self.content_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("ranking.{name} must be a finite number >= 0"));
            }
        }
        if self.path_weight == 0.0 && self.content_weight == 0.0 {
            return Err("ranking.path_weight and ranking.content_weight cannot both be 0".to_string());
        }
        if self.recommend_limit == 0 {
            return Err("ranking.recommend_limit must be > 0".to_string());
        }
        if !(self.definition_threshold >= 0.0 && self.definition_threshold < 1.0) {
            return Err("ranking.definition_threshold must be in [0, 1)".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_favour_paths() {
        let config = RankingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.path_weight > config.content_weight);
    }

    #[test]
    fn rejects_bad_values() {
        let negative = RankingConfig {
            content_weight: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let both_zero = RankingConfig {
            path_weight: 0.0,
            content_weight: 0.0,
            ..Default::default()
        };
        assert!(both_zero.validate().is_err());

        let threshold = RankingConfig {
            definition_threshold: 1.0,
            ..Default::default()
        };
        assert!(threshold.validate().is_err());

        let nan = RankingConfig {
            path_weight: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
