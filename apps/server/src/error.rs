//! Server error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use vidquiz_core::VidquizError;

/// Errors surfaced to HTTP callers. Everything that escapes the per-sentence
/// boundary collapses into one of these; clients never see a partial result.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable captions for the requested video
    #[error("no captions found")]
    NoCaptions,

    /// Any failure outside the per-sentence boundary
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<VidquizError> for ApiError {
    fn from(e: VidquizError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoCaptions => (StatusCode::BAD_REQUEST, "No captions found."),
            ApiError::Internal(reason) => {
                tracing::error!(reason = %reason, "quiz generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate quiz.")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
