mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod ranking;
mod routes;
mod screening;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::UploadLimits;
use crate::llm_client::LlmClient;
use crate::ranking::HttpRankingClient;
use crate::routes::build_router;
use crate::skills::extractor::{KeywordSkillExtractor, LlmSkillExtractor, SkillExtractor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Skill extractor: Claude when a key is configured, keyword vocabulary otherwise
    let skill_extractor: Arc<dyn SkillExtractor> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM skill extraction enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmSkillExtractor::new(llm))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, using keyword skill extraction");
            Arc::new(KeywordSkillExtractor)
        }
    };

    let ranking = Arc::new(HttpRankingClient::new(config.ranking_service_url.clone())?);
    info!("Ranking service: {}", config.ranking_service_url);

    let upload_limits = UploadLimits {
        max_file_bytes: config.max_upload_bytes,
        max_files: config.max_upload_files,
    };

    let state = AppState {
        config: config.clone(),
        skill_extractor,
        ranking,
        upload_limits,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
