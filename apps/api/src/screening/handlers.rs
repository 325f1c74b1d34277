use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::ranking::handlers::DEFAULT_TOP_K;
use crate::screening::{screen, ScreeningReport, ScreeningRequest};
use crate::state::AppState;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    #[serde(default)]
    pub jd_text: String,
    #[serde(default, alias = "resumeData")]
    pub resumes: BTreeMap<String, String>,
    #[serde(default)]
    pub include_ranking: bool,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// POST /api/v1/screen
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(req): Json<ScreenRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jdText is required".to_string()));
    }
    if req.resumes.is_empty() {
        return Err(AppError::Validation("resumes must not be empty".to_string()));
    }

    let report = screen(
        state.skill_extractor.as_ref(),
        state.ranking.as_ref(),
        ScreeningRequest {
            jd_text: &req.jd_text,
            resumes: &req.resumes,
            include_ranking: req.include_ranking,
            top_k: req.top_k,
        },
    )
    .await;

    Ok(Json(report))
}
