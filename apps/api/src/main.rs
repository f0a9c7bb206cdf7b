mod app;
mod config;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod navigation;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::{AppContext, AppSession};
use crate::config::{Config, StateBackend};
use crate::gateway::GeminiGateway;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileSlot, MemorySlot, RedisSlot, StateSlot, StateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Open the persisted state slot and restore the last session
    let slot = open_slot(&config.state_backend)?;
    info!("State backend: {} (key: {})", slot.backend(), config.state_key);
    let mut session = AppSession::new(StateStore::new(slot, config.state_key.clone()));
    session.restore().await;

    // Initialize LLM client and gateway
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let gateway = Arc::new(GeminiGateway::new(llm));

    // Build app state
    let state = AppState {
        ctx: AppContext::new(session, gateway),
        config: Arc::new(config.clone()),
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

fn open_slot(backend: &StateBackend) -> Result<Arc<dyn StateSlot>> {
    Ok(match backend {
        StateBackend::File { dir } => Arc::new(FileSlot::new(dir.clone())),
        StateBackend::Redis { url } => Arc::new(RedisSlot::open(url)?),
        StateBackend::Memory => Arc::new(MemorySlot::default()),
    })
}
