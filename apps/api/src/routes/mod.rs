pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::ranking::handlers as ranking;
use crate::screening::handlers as screening;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.upload_limits.max_body_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/health", get(health::health_handler))
        // Skills
        .route("/api/v1/extract-skills", post(skills::handle_extract_skills))
        .route("/api/v1/analyze-gap", post(skills::handle_analyze_gap))
        .route("/api/v1/match-skills", post(matching::handle_match_skills))
        // Similarity ranking
        .route("/api/v1/rank-resumes", post(ranking::handle_rank_resumes))
        .route("/api/v1/screen", post(screening::handle_screen))
        // Uploads
        .route("/api/v1/extract-text", post(extraction::handle_extract_text))
        .route(
            "/api/v1/extract-multiple-texts",
            post(extraction::handle_extract_multiple_texts),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
