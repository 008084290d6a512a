use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{ContentRepository, RankingEngine},
};

pub mod admin;
pub mod recommendations;

/// Bounds on the number of recommendations a request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl LimitPolicy {
    /// Applies the default when no limit is given and clamps to the maximum
    pub fn resolve(&self, requested: Option<usize>) -> AppResult<usize> {
        match requested {
            Some(0) => Err(AppError::InvalidInput(
                "limit must be at least 1".to_string(),
            )),
            Some(limit) => Ok(limit.min(self.max_limit)),
            None => Ok(self.default_limit),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RankingEngine>,
    pub repository: Arc<dyn ContentRepository>,
    pub limits: LimitPolicy,
}

impl AppState {
    pub fn new(
        engine: RankingEngine,
        repository: Arc<dyn ContentRepository>,
        limits: LimitPolicy,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            repository,
            limits,
        }
    }

    /// Builds state from configuration around an existing repository
    pub fn from_config(
        config: &Config,
        repository: Arc<dyn ContentRepository>,
    ) -> anyhow::Result<Self> {
        let engine = config.ranking_engine()?;
        let limits = LimitPolicy {
            default_limit: config.ranking_default_limit,
            max_limit: config.ranking_max_limit,
        };
        Ok(Self::new(engine, repository, limits))
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations",
            get(recommendations::recommend_from_repository).post(recommendations::rank_batch),
        )
        .route(
            "/admin/test-recommendations",
            post(admin::test_recommendations),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
