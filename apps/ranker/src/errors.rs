use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the ranking endpoints.
/// Rendered as `{"error": "<message>"}`, the shape API clients of this service parse.
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("resume_texts and resume_ids required")]
    MissingResumes,

    #[error("resume_texts and resume_ids length mismatch")]
    LengthMismatch,

    #[error("jd_text required")]
    MissingQuery,

    #[error("Index not built. Call /build-index first.")]
    IndexNotBuilt,
}

impl IntoResponse for RankerError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected ranking request: {self}");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
