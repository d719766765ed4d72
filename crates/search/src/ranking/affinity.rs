//! Per-degree like weights

use friendly_common::errors::Result;
use friendly_common::RankingConfig;

/// Weight of the user's own like and of a like at each friendship degree
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityWeights {
    self_weight: f64,
    degree_weights: Vec<f64>,
}

impl Default for AffinityWeights {
    /// 2 for the user, then 1, 0.5, 0.25, 0.125, 0.0625 for degrees 1..5
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

impl AffinityWeights {
    /// Build the decay table described by the ranking configuration
    pub fn from_config(config: &RankingConfig) -> Self {
        Self {
            self_weight: config.self_weight,
            degree_weights: config.degree_weights(),
        }
    }

    /// Validated variant of [`AffinityWeights::from_config`]
    pub fn try_from_config(config: &RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub fn self_weight(&self) -> f64 {
        self.self_weight
    }

    /// Weight of one like at `degree` (1-based), `None` beyond the table
    pub fn degree_weight(&self, degree: usize) -> Option<f64> {
        degree
            .checked_sub(1)
            .and_then(|i| self.degree_weights.get(i))
            .copied()
    }

    /// Weights for degrees 1..=depth, in order
    pub fn degree_weights(&self) -> &[f64] {
        &self.degree_weights
    }

    /// Number of degrees that carry weight
    pub fn depth(&self) -> usize {
        self.degree_weights.len()
    }
}
