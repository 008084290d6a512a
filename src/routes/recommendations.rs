use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{ContentRecord, RecommendationResponse, UserType},
    routes::AppState,
    services::RankingRequest,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankBatchRequest {
    pub items: Vec<ContentRecord>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Ranks a batch supplied in the request body
pub async fn rank_batch(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RankBatchRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let limit = state.limits.resolve(request.limit)?;
    let user_type = UserType::resolve(request.user_type.as_deref());

    tracing::info!(
        request_id = %request_id,
        items = request.items.len(),
        user_type = ?user_type,
        limit,
        "Ranking supplied batch"
    );

    let response = state.engine.rank(RankingRequest {
        records: request.items,
        user_type,
        now: Utc::now(),
        limit: Some(limit),
        include_ranked_order: false,
    })?;

    Ok(Json(response))
}

/// Ranks everything the content repository currently holds
pub async fn recommend_from_repository(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let limit = state.limits.resolve(query.limit)?;
    let user_type = UserType::resolve(query.user_type.as_deref());

    let records = state.repository.fetch_all().await?;

    tracing::info!(
        request_id = %request_id,
        repository = state.repository.name(),
        items = records.len(),
        user_type = ?user_type,
        limit,
        "Ranking repository content"
    );

    let response = state.engine.rank(RankingRequest {
        records,
        user_type,
        now: Utc::now(),
        limit: Some(limit),
        include_ranked_order: false,
    })?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        routes::{create_router, LimitPolicy},
        services::{content_repository::MockContentRepository, RankingEngine},
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::sync::Arc;

    fn record(id: &str, kind: &str, views: f64) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            kind: kind.to_string(),
            views: Some(views),
            likes: None,
            participants: Some(2.0),
            followers: None,
            featured: false,
            status: "active".to_string(),
            created_at: Utc::now(),
            category: None,
            title: None,
        }
    }

    fn server(repository: MockContentRepository) -> TestServer {
        let state = AppState::new(
            RankingEngine::default(),
            Arc::new(repository),
            LimitPolicy::default(),
        );
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_get_ranks_repository_content() {
        let mut repository = MockContentRepository::new();
        repository.expect_fetch_all().times(1).returning(|| {
            Ok(vec![
                record("v1", "video", 10.0),
                record("p1", "project", 0.0),
                record("c1", "desafio", 0.0),
            ])
        });
        repository.expect_name().return_const("mock");

        let response = server(repository)
            .get("/api/v1/recommendations")
            .add_query_param("userType", "sponsor")
            .add_query_param("limit", 2)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
        assert_eq!(body["statistics"]["total"], 3);
        assert_eq!(body["statistics"]["userType"], "sponsor");
    }

    #[tokio::test]
    async fn test_repository_failure_is_internal_error() {
        let mut repository = MockContentRepository::new();
        repository
            .expect_fetch_all()
            .returning(|| Err(AppError::Internal("storage offline".to_string())));
        repository.expect_name().return_const("mock");

        let response = server(repository).get("/api/v1/recommendations").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_repository_record_with_unknown_kind_is_unprocessable() {
        let mut repository = MockContentRepository::new();
        repository
            .expect_fetch_all()
            .returning(|| Ok(vec![record("x", "livestream", 1.0)]));
        repository.expect_name().return_const("mock");

        let response = server(repository).get("/api/v1/recommendations").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
