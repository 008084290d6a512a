mod content;
mod recommendation;
mod user_type;

pub use content::{ContentItem, ContentRecord, EngagementCounters, Kind};
pub use recommendation::{
    AlgorithmInfo, KindCounts, KindWeights, RankingStatistics, RecommendationResponse,
    ScoreBreakdown, ScoredItem,
};
pub use user_type::UserType;
