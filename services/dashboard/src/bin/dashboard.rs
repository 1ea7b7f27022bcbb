//! services/dashboard/src/bin/dashboard.rs

use axum::http::HeaderValue;
use dashboard_lib::{
    adapters::{FileSessionStorage, FsExporter},
    config::Config,
    error::ApiError,
    web::{app_router, state::AppState, SessionProvider},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting dashboard...");

    // --- 2. Restore the Session ---
    // Gated routes answer 503 until this completes, so it runs before serving.
    let storage = Arc::new(FileSessionStorage::open(&config.session_store_path).await?);
    info!("Session store at {}", storage.path().display());
    let sessions = Arc::new(SessionProvider::new(storage, config.login_latency));
    let status = sessions.initialize().await;
    info!("Session restored: {:?}", status);

    // --- 3. Build the Shared AppState ---
    let exporter = Arc::new(FsExporter::new(&config.export_dir));
    let app_state = Arc::new(AppState {
        sessions: sessions.clone(),
        exporter,
        timings: config.pipeline_timings(),
    });

    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let app = app_router(app_state, allowed_origin);

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sessions.teardown().await;
    info!("Dashboard stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
