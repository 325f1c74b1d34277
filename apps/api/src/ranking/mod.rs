//! Client side of the similarity-ranking microservice.
//!
//! `AppState` carries an `Arc<dyn RankingService>`; production uses `HttpRankingClient`.
//! Unavailability (service down, unreachable, timing out) is reported as
//! `RankingError::Unavailable` so handlers can answer 503 instead of a generic 500.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod handlers;

pub use client::HttpRankingClient;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("ranking service unavailable: {0}")]
    Unavailable(String),

    #[error("ranking service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("unexpected ranking service response: {0}")]
    Decode(String),
}

/// One ranked resume as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResume {
    pub resume_id: String,
    pub similarity_score: f64,
    pub rank: u32,
    /// Leading excerpt of the resume text.
    #[serde(default)]
    pub resume_text: String,
}

/// Ordered ranking results, best match first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResults {
    pub results: Vec<RankedResume>,
    pub total_found: usize,
    pub algorithm: String,
    pub query: String,
    pub total_resumes: usize,
}

#[async_trait]
pub trait RankingService: Send + Sync {
    /// Health probe; callers poll it before ranking. Never errors: unreachable means unhealthy.
    async fn is_healthy(&self) -> bool;

    /// Indexes `corpus` (id → text) and ranks it against `query`, returning at most `top_k` entries.
    async fn rank_resumes(
        &self,
        query: &str,
        corpus: &BTreeMap<String, String>,
        top_k: usize,
    ) -> Result<RankingResults, RankingError>;
}
