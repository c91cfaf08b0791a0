use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::catalog::CatalogError;
use crate::stream::StreamError;

/// Application error type. Missing fields in upstream data are never errors;
/// only validation and upstream calls can fail.
#[derive(Debug)]
pub enum AppError {
    /// Missing or empty required parameter. No upstream call was made.
    BadRequest(String),
    NotFound(String),
    /// Catalog or stream provider failure, message passed through verbatim.
    Upstream(String),
    /// The request exceeded its deadline; in-flight upstream calls were dropped.
    Timeout,
}

impl AppError {
    pub fn missing_param(name: &str) -> Self {
        AppError::BadRequest(format!("Missing '{}' parameter", name))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidQuery => AppError::missing_param("query"),
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Unavailable(msg) => AppError::Upstream(msg),
        }
    }
}

impl From<StreamError> for AppError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::InvalidUrl => AppError::missing_param("url"),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string()),
            AppError::Upstream(msg) => {
                tracing::warn!(error = %msg, "upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
