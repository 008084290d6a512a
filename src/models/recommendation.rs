use serde::{Deserialize, Serialize};

use super::{ContentItem, EngagementCounters, Kind, UserType};

/// Per-kind multipliers for one user type. Every kind has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindWeights {
    pub video: f64,
    pub project: f64,
    pub challenge: f64,
}

impl KindWeights {
    pub const NEUTRAL: KindWeights = KindWeights {
        video: 1.0,
        project: 1.0,
        challenge: 1.0,
    };

    pub fn get(&self, kind: Kind) -> f64 {
        match kind {
            Kind::Video => self.video,
            Kind::Project => self.project,
            Kind::Challenge => self.challenge,
        }
    }
}

/// Factors that produced an item's final score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub counters: EngagementCounters,
    /// Log-damped weighted engagement sum
    pub engagement: f64,
    pub recency_multiplier: f64,
    pub featured_multiplier: f64,
    pub featured: bool,
    pub applied_weight: f64,
    pub category: Option<String>,
}

/// A content item scored for one ranking call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub popularity_score: f64,
    pub user_weight: f64,
    pub final_score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub video: usize,
    pub project: usize,
    pub challenge: usize,
}

impl KindCounts {
    pub fn increment(&mut self, kind: Kind) {
        match kind {
            Kind::Video => self.video += 1,
            Kind::Project => self.project += 1,
            Kind::Challenge => self.challenge += 1,
        }
    }
}

/// Aggregates over the whole scored batch (before truncation)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingStatistics {
    pub total: usize,
    pub by_kind: KindCounts,
    pub featured_count: usize,
    pub mean_popularity_score: f64,
    pub mean_final_score: f64,
    pub user_type: Option<UserType>,
    pub weights: KindWeights,
}

/// Human-readable description of the ranking run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub description: String,
    pub factors: Vec<String>,
    pub band_size: usize,
    pub recency_half_life_days: f64,
    pub featured_boost: f64,
}

/// Result of one ranking call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredItem>,
    pub statistics: RankingStatistics,
    pub algorithm: AlgorithmInfo,
    /// Ids in pre-shuffle rank order; only filled for inspection requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked_order: Option<Vec<String>>,
}
