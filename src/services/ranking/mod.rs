//! Content ranking engine
//!
//! Scores a batch of content items, weights them for the requesting user
//! type and returns a banded, randomized ordering. Every call is independent:
//! the engine holds only immutable configuration and draws randomness from a
//! generator local to the call.

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::num::NonZeroUsize;

use crate::{
    error::RankingError,
    models::{
        AlgorithmInfo, ContentItem, ContentRecord, KindWeights, RecommendationResponse,
        ScoreBreakdown, ScoredItem, UserType,
    },
};

pub mod scoring;
pub mod shuffle;
pub mod statistics;
pub mod weights;

pub use scoring::{PopularityScore, ScoringPolicy};
pub use shuffle::{intelligent_shuffle, sort_by_score_desc};
pub use weights::WeightTable;

pub const DEFAULT_BAND_SIZE: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(size) => size,
    None => panic!("default band size must be non-zero"),
};

/// Input of one ranking call
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub records: Vec<ContentRecord>,
    pub user_type: Option<UserType>,
    pub now: DateTime<Utc>,
    /// Applied after shuffling; `None` returns the whole batch
    pub limit: Option<usize>,
    /// Also report ids in pre-shuffle rank order
    pub include_ranked_order: bool,
}

#[derive(Debug, Clone)]
pub struct RankingEngine {
    policy: ScoringPolicy,
    weights: WeightTable,
    band_size: NonZeroUsize,
}

impl RankingEngine {
    pub fn new(
        policy: ScoringPolicy,
        weights: WeightTable,
        band_size: usize,
    ) -> Result<Self, RankingError> {
        policy.validate()?;
        let band_size = NonZeroUsize::new(band_size).ok_or_else(|| {
            RankingError::Configuration("band size must be at least 1".to_string())
        })?;

        Ok(Self {
            policy,
            weights,
            band_size,
        })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn band_size(&self) -> NonZeroUsize {
        self.band_size
    }

    pub fn weights_for(&self, user_type: Option<UserType>) -> KindWeights {
        self.weights.weights_for(user_type)
    }

    /// Scores one validated item with an already resolved weight table.
    /// A non-finite score means the weights overflowed and is reported as a
    /// configuration error.
    pub fn score_item(
        &self,
        item: ContentItem,
        weights: &KindWeights,
        now: DateTime<Utc>,
    ) -> Result<ScoredItem, RankingError> {
        let popularity = self.policy.score(&item, now);
        let user_weight = weights.get(item.kind);
        let final_score = popularity.value * user_weight;

        if !popularity.value.is_finite() || !final_score.is_finite() {
            return Err(RankingError::Configuration(format!(
                "score of item {} is not finite (popularity {}, weight {})",
                item.id, popularity.value, user_weight
            )));
        }

        Ok(ScoredItem {
            breakdown: ScoreBreakdown {
                counters: item.counters,
                engagement: popularity.engagement,
                recency_multiplier: popularity.recency_multiplier,
                featured_multiplier: popularity.featured_multiplier,
                featured: item.featured,
                applied_weight: user_weight,
                category: item.category.clone(),
            },
            popularity_score: popularity.value,
            user_weight,
            final_score,
            item,
        })
    }

    /// Validates the whole batch, then scores it. Fails on the first bad record.
    pub fn score_batch(
        &self,
        records: Vec<ContentRecord>,
        user_type: Option<UserType>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredItem>, RankingError> {
        let items = records
            .into_iter()
            .map(ContentItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let weights = self.weights_for(user_type);
        items
            .into_iter()
            .map(|item| self.score_item(item, &weights, now))
            .collect()
    }

    /// Ranks a batch with a freshly seeded generator
    pub fn rank(&self, request: RankingRequest) -> Result<RecommendationResponse, RankingError> {
        let mut rng = StdRng::from_entropy();
        self.rank_with_rng(request, &mut rng)
    }

    /// Ranks a batch drawing randomness from `rng`
    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        request: RankingRequest,
        rng: &mut R,
    ) -> Result<RecommendationResponse, RankingError> {
        let batch_size = request.records.len();
        let scored = self
            .score_batch(request.records, request.user_type, request.now)
            .map_err(|e| {
                tracing::warn!(error = %e, batch_size, "Ranking batch rejected");
                e
            })?;

        let weights = self.weights_for(request.user_type);
        let statistics = statistics::aggregate(&scored, request.user_type, weights);

        let ranked_order = request.include_ranked_order.then(|| {
            let mut sorted: Vec<&ScoredItem> = scored.iter().collect();
            sort_by_score_desc(&mut sorted, |s| s.final_score);
            sorted.iter().map(|s| s.item.id.clone()).collect()
        });

        let mut recommendations =
            intelligent_shuffle(scored, |s| s.final_score, self.band_size, rng);
        if let Some(limit) = request.limit {
            recommendations.truncate(limit);
        }

        tracing::debug!(
            batch_size,
            user_type = ?request.user_type,
            returned = recommendations.len(),
            "Ranked content batch"
        );

        Ok(RecommendationResponse {
            recommendations,
            statistics,
            algorithm: self.algorithm_info(),
            ranked_order,
        })
    }

    pub fn algorithm_info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            description: "Popularity score from log-damped engagement, boosted by recency and \
                          featured status, scaled by user-type weights, then shuffled within \
                          fixed-size rank bands"
                .to_string(),
            factors: vec![
                "views".to_string(),
                "likes".to_string(),
                "participants".to_string(),
                "followers".to_string(),
                "recency".to_string(),
                "featured".to_string(),
                "userType".to_string(),
            ],
            band_size: self.band_size.get(),
            recency_half_life_days: self.policy.recency_half_life_days,
            featured_boost: self.policy.featured_boost,
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            weights: WeightTable::default(),
            band_size: DEFAULT_BAND_SIZE,
        }
    }
}
