use crate::models::{KindCounts, KindWeights, RankingStatistics, ScoredItem, UserType};

/// Read-only reduction over a scored batch. Means of an empty batch are 0.
pub fn aggregate(
    items: &[ScoredItem],
    user_type: Option<UserType>,
    weights: KindWeights,
) -> RankingStatistics {
    let mut by_kind = KindCounts::default();
    let mut featured_count = 0;
    let mut popularity_sum = 0.0;
    let mut final_sum = 0.0;

    for scored in items {
        by_kind.increment(scored.item.kind);
        if scored.item.featured {
            featured_count += 1;
        }
        popularity_sum += scored.popularity_score;
        final_sum += scored.final_score;
    }

    RankingStatistics {
        total: items.len(),
        by_kind,
        featured_count,
        mean_popularity_score: mean(popularity_sum, items.len()),
        mean_final_score: mean(final_sum, items.len()),
        user_type,
        weights,
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentItem, EngagementCounters, Kind, ScoreBreakdown};
    use chrono::Utc;

    fn scored(id: &str, kind: Kind, featured: bool, popularity: f64, weight: f64) -> ScoredItem {
        ScoredItem {
            item: ContentItem {
                id: id.to_string(),
                kind,
                counters: EngagementCounters::default(),
                featured,
                status: "active".to_string(),
                created_at: Utc::now(),
                category: None,
                title: None,
            },
            popularity_score: popularity,
            user_weight: weight,
            final_score: popularity * weight,
            breakdown: ScoreBreakdown {
                counters: EngagementCounters::default(),
                engagement: 0.0,
                recency_multiplier: 1.0,
                featured_multiplier: 1.0,
                featured,
                applied_weight: weight,
                category: None,
            },
        }
    }

    #[test]
    fn test_empty_batch_means_are_zero() {
        let stats = aggregate(&[], None, KindWeights::NEUTRAL);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.mean_popularity_score, 0.0);
        assert_eq!(stats.mean_final_score, 0.0);
        assert_eq!(stats.by_kind, KindCounts::default());
    }

    #[test]
    fn test_aggregate_counts_and_means() {
        let weights = KindWeights {
            video: 2.0,
            project: 1.0,
            challenge: 0.5,
        };
        let items = vec![
            scored("a", Kind::Video, true, 4.0, 2.0),
            scored("b", Kind::Video, false, 2.0, 2.0),
            scored("c", Kind::Challenge, false, 6.0, 0.5),
        ];

        let stats = aggregate(&items, Some(UserType::Fan), weights);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_kind.video, 2);
        assert_eq!(stats.by_kind.challenge, 1);
        assert_eq!(stats.featured_count, 1);
        assert_eq!(stats.mean_popularity_score, 4.0);
        assert_eq!(stats.mean_final_score, 5.0);
        assert_eq!(stats.user_type, Some(UserType::Fan));
        assert_eq!(stats.weights, weights);
    }
}
