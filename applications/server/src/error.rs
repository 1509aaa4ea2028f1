/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mindful_core::MindfulError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Media probe failed: {0}")]
    MediaProbe(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MindfulError> for ServerError {
    fn from(err: MindfulError) -> Self {
        match err {
            MindfulError::Validation(msg) => ServerError::BadRequest(msg),
            MindfulError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            MindfulError::InvalidState(msg) => ServerError::Conflict(msg),
            MindfulError::MediaProbe(msg) => ServerError::MediaProbe(msg),
            MindfulError::Playback(msg) => ServerError::Playback(msg),
            MindfulError::Persistence(msg) => ServerError::Database(msg),
            MindfulError::Io(e) => ServerError::Io(e),
        }
    }
}

impl From<mindful_storage::StorageError> for ServerError {
    fn from(err: mindful_storage::StorageError) -> Self {
        // StorageError -> MindfulError -> ServerError
        MindfulError::from(err).into()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::MediaProbe(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ServerError::Playback(msg) => {
                tracing::error!("Playback error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
