use chrono::{DateTime, Utc};

use crate::{
    error::RankingError,
    models::{ContentItem, EngagementCounters, Kind},
};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Upper bounds keeping the worst-case score (all counters at `u64::MAX`)
/// far below `f64::MAX`.
pub const MAX_COUNTER_WEIGHT: f64 = 1e3;
pub const MAX_RECENCY_BONUS: f64 = 1e3;
pub const MAX_FEATURED_BOOST: f64 = 100.0;
pub const MAX_BASELINE: f64 = 1e6;

/// Tunable constants of the popularity score
///
/// `popularity = (baseline + ln(1 + weighted_engagement)) * recency * featured`
/// where `recency = 1 + recency_max_bonus * 0.5^(age_days / half_life)`.
/// An item with no engagement, no recency bonus left and no featured flag
/// scores exactly `baseline`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub view_weight: f64,
    pub like_weight: f64,
    pub participant_weight: f64,
    pub follower_weight: f64,
    pub recency_half_life_days: f64,
    pub recency_max_bonus: f64,
    pub featured_boost: f64,
    pub baseline: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            view_weight: 1.0,
            like_weight: 5.0,
            participant_weight: 10.0,
            follower_weight: 2.0,
            recency_half_life_days: 7.0,
            recency_max_bonus: 1.0,
            featured_boost: 1.5,
            baseline: 1.0,
        }
    }
}

/// Popularity score of one item with the intermediate factors kept for the breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityScore {
    pub value: f64,
    pub engagement: f64,
    pub recency_multiplier: f64,
    pub featured_multiplier: f64,
}

impl ScoringPolicy {
    /// Checks the invariants the score formula relies on
    pub fn validate(&self) -> Result<(), RankingError> {
        let bounded = [
            ("view_weight", self.view_weight, MAX_COUNTER_WEIGHT),
            ("like_weight", self.like_weight, MAX_COUNTER_WEIGHT),
            ("participant_weight", self.participant_weight, MAX_COUNTER_WEIGHT),
            ("follower_weight", self.follower_weight, MAX_COUNTER_WEIGHT),
            ("recency_max_bonus", self.recency_max_bonus, MAX_RECENCY_BONUS),
        ];
        for (name, value, max) in bounded {
            if !value.is_finite() || !(0.0..=max).contains(&value) {
                return Err(RankingError::Configuration(format!(
                    "{} must be between 0 and {}, got {}",
                    name, max, value
                )));
            }
        }

        if !self.recency_half_life_days.is_finite() || self.recency_half_life_days <= 0.0 {
            return Err(RankingError::Configuration(format!(
                "recency half-life must be positive, got {}",
                self.recency_half_life_days
            )));
        }

        if !self.featured_boost.is_finite()
            || self.featured_boost <= 1.0
            || self.featured_boost > MAX_FEATURED_BOOST
        {
            return Err(RankingError::Configuration(format!(
                "featured boost must be greater than 1 and at most {}, got {}",
                MAX_FEATURED_BOOST, self.featured_boost
            )));
        }

        if !self.baseline.is_finite() || self.baseline <= 0.0 || self.baseline > MAX_BASELINE {
            return Err(RankingError::Configuration(format!(
                "baseline must be positive and at most {}, got {}",
                MAX_BASELINE, self.baseline
            )));
        }

        Ok(())
    }

    /// Weighted sum of the counters relevant to the item's kind
    pub fn weighted_engagement(&self, kind: Kind, counters: &EngagementCounters) -> f64 {
        match kind {
            Kind::Video => {
                counters.views as f64 * self.view_weight + counters.likes as f64 * self.like_weight
            }
            Kind::Project => {
                counters.participants as f64 * self.participant_weight
                    + counters.likes as f64 * self.like_weight
                    + counters.followers as f64 * self.follower_weight
            }
            Kind::Challenge => counters.participants as f64 * self.participant_weight,
        }
    }

    /// Recency multiplier in `(1, 1 + recency_max_bonus]`, halving its bonus every half-life.
    /// Items dated in the future are treated as brand new.
    pub fn recency_multiplier(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let age_seconds = (now - created_at).num_seconds().max(0) as f64;
        let age_days = age_seconds / SECONDS_PER_DAY;
        1.0 + self.recency_max_bonus * 0.5f64.powf(age_days / self.recency_half_life_days)
    }

    /// Scores a single item at time `now`
    pub fn score(&self, item: &ContentItem, now: DateTime<Utc>) -> PopularityScore {
        let engagement = self.weighted_engagement(item.kind, &item.counters).ln_1p();
        let recency_multiplier = self.recency_multiplier(item.created_at, now);
        let featured_multiplier = if item.featured {
            self.featured_boost
        } else {
            1.0
        };

        PopularityScore {
            value: (self.baseline + engagement) * recency_multiplier * featured_multiplier,
            engagement,
            recency_multiplier,
            featured_multiplier,
        }
    }
}
