mod coach;
mod config;
mod consensus;
mod errors;
mod jobs;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::consensus::synthesizer::ConsensusSynthesizer;
use crate::jobs::pipeline::AcquisitionPipeline;
use crate::jobs::ranking::KeywordRelevanceScorer;
use crate::jobs::source::LinkedInGuestSource;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn TextGenerator> = Arc::new(
        LlmClient::new(config.groq_api_key.clone(), config.llm_timeout)
            .with_endpoint(config.llm_endpoint.clone()),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize job source and acquisition pipeline
    let source = LinkedInGuestSource::new(config.job_source_url.clone(), config.job_source_timeout);
    let pipeline = AcquisitionPipeline::new(Arc::new(source));
    info!(
        "Job source: {} (timeout {:?})",
        config.job_source_url, config.job_source_timeout
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: llm.clone(),
        pipeline,
        scorer: Arc::new(KeywordRelevanceScorer),
        synthesizer: ConsensusSynthesizer::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
