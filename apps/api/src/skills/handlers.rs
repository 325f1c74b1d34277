//! Axum route handlers for skill extraction and gap analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::handlers::lenient_names;
use crate::skills::extractor::GapAnalysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub text: String,
    /// Free-form label echoed back ("jd", "resume", ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSkillsResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub skills: Vec<String>,
    pub skill_count: usize,
    pub backend: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeGapRequest {
    #[serde(default, alias = "jdSkills", deserialize_with = "lenient_names")]
    pub required_skills: Vec<String>,
    #[serde(default, alias = "resumeSkills", deserialize_with = "lenient_names")]
    pub candidate_skills: Vec<String>,
}

/// POST /api/v1/extract-skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(req): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let skills = state.skill_extractor.extract_skills(&req.text).await;
    let kind = req.kind.unwrap_or_else(|| "unknown".to_string());

    info!(
        kind = %kind,
        backend = state.skill_extractor.backend(),
        "Extracted {} skills",
        skills.len()
    );

    Ok(Json(ExtractSkillsResponse {
        kind,
        skill_count: skills.len(),
        skills,
        backend: state.skill_extractor.backend(),
    }))
}

/// POST /api/v1/analyze-gap
pub async fn handle_analyze_gap(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeGapRequest>,
) -> Result<Json<GapAnalysis>, AppError> {
    if req.required_skills.is_empty() {
        return Err(AppError::Validation("requiredSkills must not be empty".to_string()));
    }

    let analysis = state
        .skill_extractor
        .analyze_skill_gap(&req.required_skills, &req.candidate_skills)
        .await;

    Ok(Json(analysis))
}
