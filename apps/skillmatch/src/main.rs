mod capabilities;
mod config;
mod errors;
mod llm_client;
mod orchestrator;
mod routes;
mod skills;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::capabilities::{default_registry, AdvisoryFinalizer, DocumentRoot};
use crate::config::Config;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::orchestrator::SkillGapOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn LanguageModel> = Arc::new(LlmClient::new(config.anthropic_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Extractors only read documents under this directory; uploads are written there too
    let documents = DocumentRoot::new(&config.document_root).with_context(|| {
        format!("DOCUMENT_ROOT '{}' is not an accessible directory", config.document_root.display())
    })?;
    info!("Document root: {}", documents.path().display());

    // Capability registry: every capability must be present before the loop starts
    let registry = Arc::new(default_registry(
        llm.clone(),
        config.target_role.clone(),
        documents,
    )?);
    info!(
        "Capability registry ready ({} capabilities, target role: {})",
        registry.descriptors().count(),
        config.target_role.as_deref().unwrap_or("any")
    );

    let limits = config.loop_limits();
    info!(
        "Decision loop limits: max_steps={}, stall_threshold={}",
        limits.max_steps, limits.stall_threshold
    );

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(SkillGapOrchestrator::new(llm.clone(), registry, limits)),
        advisor: Arc::new(AdvisoryFinalizer::new(llm)),
        config: config.clone(),
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
