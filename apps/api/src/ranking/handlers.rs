use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ranking::{RankingError, RankingResults};
use crate::state::AppState;

pub const DEFAULT_TOP_K: usize = 10;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResumesRequest {
    #[serde(default)]
    pub jd_text: String,
    /// resume id → resume text
    #[serde(default)]
    pub resume_data: BTreeMap<String, String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// POST /api/v1/rank-resumes
///
/// Probes the ranking service first so a stopped service answers 503
/// rather than a generic failure.
pub async fn handle_rank_resumes(
    State(state): State<AppState>,
    Json(req): Json<RankResumesRequest>,
) -> Result<Json<RankingResults>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jdText is required".to_string()));
    }
    if req.resume_data.is_empty() {
        return Err(AppError::Validation("resumeData must not be empty".to_string()));
    }

    if !state.ranking.is_healthy().await {
        return Err(RankingError::Unavailable("health probe failed".to_string()).into());
    }

    info!(
        resumes = req.resume_data.len(),
        top_k = req.top_k,
        "Ranking resumes"
    );

    let results = state
        .ranking
        .rank_resumes(&req.jd_text, &req.resume_data, req.top_k)
        .await?;

    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: RankResumesRequest =
            serde_json::from_str(r#"{"jdText": "Rust", "resumeData": {"a": "Rust"}}"#).unwrap();
        assert_eq!(req.top_k, DEFAULT_TOP_K);
        assert_eq!(req.resume_data["a"], "Rust");

        let empty: RankResumesRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.jd_text.is_empty());
        assert!(empty.resume_data.is_empty());
    }
}
