use std::sync::Arc;

use crate::config::Config;
use crate::extraction::UploadLimits;
use crate::ranking::RankingService;
use crate::skills::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable skill extractor. LLM-backed when an API key is configured, keyword scan otherwise.
    pub skill_extractor: Arc<dyn SkillExtractor>,
    /// Client of the external similarity-ranking service.
    pub ranking: Arc<dyn RankingService>,
    pub upload_limits: UploadLimits,
}
