use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use copydesk_api::config::ServerConfig;
use copydesk_api::router::build_app_router;
use copydesk_api::sessions::{start_sweeper, SessionStore};
use copydesk_api::state::AppState;
use copydesk_catalog::CatalogClient;
use copydesk_content::{AiContentClient, ContentStoreClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "copydesk_api=debug,copydesk_core=debug,copydesk_catalog=info,\
                 copydesk_content=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if config.services.catalog_access_token.is_empty() {
        tracing::warn!("CATALOG_ACCESS_TOKEN is not set; catalog requests will be rejected");
    }

    // --- Service clients (one shared connection pool) ---
    let http = reqwest::Client::new();
    let services = &config.services;

    let catalog = Arc::new(CatalogClient::with_client(
        http.clone(),
        services.catalog_api_url.clone(),
        services.catalog_access_token.clone(),
        services.catalog_page_size,
    ));
    let content_store = Arc::new(ContentStoreClient::with_client(
        http.clone(),
        services.content_store_url.clone(),
        Duration::from_secs(services.content_store_timeout_secs),
    ));
    let generator = Arc::new(AiContentClient::with_client(
        http,
        services.ai_service_url.clone(),
    ));
    tracing::info!(
        catalog = %services.catalog_api_url,
        ai = %services.ai_service_url,
        store = %services.content_store_url,
        "Service clients configured"
    );

    // --- Sessions ---
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(config.session_ttl_secs)));
    let sweeper_cancel = CancellationToken::new();
    let sweeper_handle = start_sweeper(Arc::clone(&sessions), sweeper_cancel.clone());

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        content_store,
        generator,
        sessions: Arc::clone(&sessions),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper_cancel.cancel();
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    let _ = tokio::time::timeout(grace, sweeper_handle).await;

    let remaining = sessions.len().await;
    tracing::info!(remaining, "Discarding in-memory sessions");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
