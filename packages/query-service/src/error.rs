//! Error types for the query service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use daocean_subgraph::{IndexerError, QueryError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("replay failed at line {line}: {message}")]
    Replay { line: usize, message: String },
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("indexer state unavailable")]
    Poisoned,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Query(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Indexer(IndexerError::Map(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Indexer(_) => StatusCode::CONFLICT,
            Error::Config(_) | Error::Replay { .. } | Error::Encode(_) | Error::Poisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (self.status(), Json(body)).into_response()
    }
}
