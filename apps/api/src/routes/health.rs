use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health, GET /api/v1/health
/// Liveness of this service plus the ranking service's health probe.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ranking = if state.ranking.is_healthy().await {
        "healthy"
    } else {
        "unavailable"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillmatch-api",
        "services": {
            "api": "healthy",
            "ranking": ranking
        },
        "rankingServiceUrl": state.config.ranking_service_url
    }))
}
