mod applications;
mod config;
mod cover_letter;
mod db;
mod errors;
mod llm_client;
mod models;
mod persistence;
mod resume;
mod routes;
mod search;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::store::PgApplicationStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::CompletionClient;
use crate::persistence::PgRecordSink;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing completion credentials fail here, before any network activity
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url)?;
    let applications = Arc::new(PgApplicationStore::new(db.clone()));
    let sink = Arc::new(PgRecordSink::new(db));

    // Initialize completion client
    let llm = CompletionClient::new(&config.pipeline, config.model.clone(), config.request_timeout)?;
    info!(
        "Completion client initialized (model: {}, endpoint: {}, timeout: {:?})",
        llm.model(),
        config.pipeline.api_base_url,
        config.request_timeout
    );
    info!(
        "Search pacing: analyze {:?}, rank {:?}",
        config.search_delays.analyze, config.search_delays.rank
    );

    let state = AppState {
        llm: Arc::new(llm),
        sink,
        applications,
        search_delays: config.search_delays,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
