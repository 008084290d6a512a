use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{ContentRecord, RecommendationResponse, UserType},
    routes::AppState,
    services::RankingRequest,
};

/// Inspection request: same as a batch ranking, with the clock and the
/// shuffle seed pinned by the caller
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecommendationsRequest {
    pub items: Vec<ContentRecord>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Ranks a batch and also reports the pre-shuffle rank order
pub async fn test_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<TestRecommendationsRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let limit = state.limits.resolve(request.limit)?;
    let user_type = UserType::resolve(request.user_type.as_deref());
    let now = request.now.unwrap_or_else(Utc::now);

    tracing::info!(
        request_id = %request_id,
        items = request.items.len(),
        user_type = ?user_type,
        seed = ?request.seed,
        "Running test ranking"
    );

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let response = state.engine.rank_with_rng(
        RankingRequest {
            records: request.items,
            user_type,
            now,
            limit: Some(limit),
            include_ranked_order: true,
        },
        &mut rng,
    )?;

    Ok(Json(response))
}
