use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::RankerError;
use crate::tfidf::{SearchHit, TextIndex, ALGORITHM};

/// The single in-memory index, replaced wholesale by every `/build-index`.
#[derive(Clone, Default)]
pub struct RankerState {
    index: Arc<RwLock<Option<TextIndex>>>,
}

#[derive(Debug, Deserialize)]
pub struct BuildIndexRequest {
    #[serde(default)]
    resume_texts: Vec<String>,
    #[serde(default)]
    resume_ids: Vec<String>,
}

fn default_top_k() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    jd_text: String,
    #[serde(default = "default_top_k")]
    top_k: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    success: bool,
    results: Vec<SearchHit>,
    total_found: usize,
    algorithm: &'static str,
}

pub fn build_router(state: RankerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/build-index", post(build_index))
        .route("/search", post(search))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "text-ranker",
        "algorithm": ALGORITHM
    }))
}

async fn build_index(
    State(state): State<RankerState>,
    Json(req): Json<BuildIndexRequest>,
) -> Result<Json<Value>, RankerError> {
    let index = TextIndex::build(req.resume_texts, req.resume_ids)?;
    let count = index.len();

    *state.index.write().await = Some(index);
    info!("Built text index with {count} resumes");

    Ok(Json(json!({
        "success": true,
        "message": format!("Text index built with {count} resumes"),
        "algorithm": ALGORITHM
    })))
}

async fn search(
    State(state): State<RankerState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, RankerError> {
    if req.jd_text.is_empty() {
        return Err(RankerError::MissingQuery);
    }

    let guard = state.index.read().await;
    let index = guard.as_ref().ok_or(RankerError::IndexNotBuilt)?;
    let results = index.search(&req.jd_text, req.top_k);

    Ok(Json(SearchResponse {
        success: true,
        total_found: results.len(),
        results,
        algorithm: ALGORITHM,
    }))
}
