use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised by the ranking engine
///
/// A batch is either ranked in full or rejected with one of these; there is
/// no partial result.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    #[error("Unsupported content kind '{kind}' on item {id}")]
    UnsupportedKind { id: String, kind: String },

    #[error("Invalid counter '{counter}' on item {id}: {value}")]
    InvalidCounter {
        id: String,
        counter: &'static str,
        value: f64,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Ranking(RankingError::UnsupportedKind { .. })
            | AppError::Ranking(RankingError::InvalidCounter { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Ranking(RankingError::Configuration(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
