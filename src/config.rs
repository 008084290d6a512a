use serde::Deserialize;
use std::collections::HashMap;

use crate::{
    error::RankingError,
    services::ranking::{RankingEngine, ScoringPolicy, WeightTable, DEFAULT_BAND_SIZE},
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Items per shuffle band
    #[serde(default = "default_band_size")]
    pub ranking_band_size: usize,

    /// Recommendations returned when the request gives no limit
    #[serde(default = "default_limit")]
    pub ranking_default_limit: usize,

    /// Upper bound applied to requested limits
    #[serde(default = "default_max_limit")]
    pub ranking_max_limit: usize,

    #[serde(default = "default_view_weight")]
    pub ranking_view_weight: f64,

    #[serde(default = "default_like_weight")]
    pub ranking_like_weight: f64,

    #[serde(default = "default_participant_weight")]
    pub ranking_participant_weight: f64,

    #[serde(default = "default_follower_weight")]
    pub ranking_follower_weight: f64,

    #[serde(default = "default_half_life_days")]
    pub ranking_recency_half_life_days: f64,

    #[serde(default = "default_recency_max_bonus")]
    pub ranking_recency_max_bonus: f64,

    #[serde(default = "default_featured_boost")]
    pub ranking_featured_boost: f64,

    /// Score of an item with no engagement, no recency bonus and not featured
    #[serde(default = "default_baseline")]
    pub ranking_baseline: f64,

    /// JSON object `{userType: {kind: weight}}` overriding the built-in weights
    #[serde(default)]
    pub ranking_user_weights: Option<String>,

    /// JSON file of content records loaded into the in-memory repository
    #[serde(default)]
    pub content_seed_path: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_band_size() -> usize {
    DEFAULT_BAND_SIZE.get()
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    100
}

fn default_view_weight() -> f64 {
    ScoringPolicy::default().view_weight
}

fn default_like_weight() -> f64 {
    ScoringPolicy::default().like_weight
}

fn default_participant_weight() -> f64 {
    ScoringPolicy::default().participant_weight
}

fn default_follower_weight() -> f64 {
    ScoringPolicy::default().follower_weight
}

fn default_half_life_days() -> f64 {
    ScoringPolicy::default().recency_half_life_days
}

fn default_recency_max_bonus() -> f64 {
    ScoringPolicy::default().recency_max_bonus
}

fn default_featured_boost() -> f64 {
    ScoringPolicy::default().featured_boost
}

fn default_baseline() -> f64 {
    ScoringPolicy::default().baseline
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ranking_band_size: default_band_size(),
            ranking_default_limit: default_limit(),
            ranking_max_limit: default_max_limit(),
            ranking_view_weight: default_view_weight(),
            ranking_like_weight: default_like_weight(),
            ranking_participant_weight: default_participant_weight(),
            ranking_follower_weight: default_follower_weight(),
            ranking_recency_half_life_days: default_half_life_days(),
            ranking_recency_max_bonus: default_recency_max_bonus(),
            ranking_featured_boost: default_featured_boost(),
            ranking_baseline: default_baseline(),
            ranking_user_weights: None,
            content_seed_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that are not covered by the engine itself
    pub fn validate(&self) -> Result<(), RankingError> {
        if self.ranking_max_limit == 0 {
            return Err(RankingError::Configuration(
                "max limit must be at least 1".to_string(),
            ));
        }
        if self.ranking_default_limit == 0 || self.ranking_default_limit > self.ranking_max_limit {
            return Err(RankingError::Configuration(format!(
                "default limit must be between 1 and {}, got {}",
                self.ranking_max_limit, self.ranking_default_limit
            )));
        }
        Ok(())
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            view_weight: self.ranking_view_weight,
            like_weight: self.ranking_like_weight,
            participant_weight: self.ranking_participant_weight,
            follower_weight: self.ranking_follower_weight,
            recency_half_life_days: self.ranking_recency_half_life_days,
            recency_max_bonus: self.ranking_recency_max_bonus,
            featured_boost: self.ranking_featured_boost,
            baseline: self.ranking_baseline,
        }
    }

    pub fn weight_table(&self) -> Result<WeightTable, RankingError> {
        match &self.ranking_user_weights {
            None => Ok(WeightTable::default()),
            Some(raw) => {
                let overrides: HashMap<String, HashMap<String, f64>> = serde_json::from_str(raw)
                    .map_err(|e| {
                        RankingError::Configuration(format!("invalid user weights JSON: {}", e))
                    })?;
                WeightTable::from_overrides(&overrides)
            }
        }
    }

    /// Builds the ranking engine, validating every tunable
    pub fn ranking_engine(&self) -> Result<RankingEngine, RankingError> {
        RankingEngine::new(
            self.scoring_policy(),
            self.weight_table()?,
            self.ranking_band_size,
        )
    }
}
