//! # Perla POS Server
//!
//! Hosts the studio: hardened static serving for the web UI, the JSON API
//! over the studio services, and the 1-second billing tick.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Perla POS Server                                 │
//! │                                                                         │
//! │  Browser ───► audit ─► rate limit ─► body cap ─► CORS ─► headers       │
//! │                                        │                                │
//! │                        ┌───────────────┴───────────────┐               │
//! │                        ▼                               ▼               │
//! │                   /api JSON API                 static web root        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  perla-studio ───► perla-store ───► ./data/*.json      │
//! │                        ▲                                                │
//! │        1s tick ────────┘  (+ one gap compensation at startup)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod audit;
mod config;
mod error;
mod headers;
mod rate_limit;
mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use perla_store::Store;
use perla_studio::{Studio, SystemClock};

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

/// Largest accepted request body (the API only ever carries small JSON).
const MAX_REQUEST_SIZE: usize = 10 * 1024 * 1024;

/// Shared application state.
pub struct AppState {
    pub studio: Studio,
    pub config: ServerConfig,
    pub rate_limiter: RateLimiter,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Perla POS server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        web_root = %config.web_root.display(),
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    // Open the document store and wire the studio
    let store = Store::open(config.data_dir.clone())?;
    let studio = Studio::new(store, Arc::new(SystemClock));

    // Seed the table registry and reconcile any downtime since the last run
    // (a restart is indistinguishable from a resumed suspension)
    studio.sessions().ensure_tables()?;
    let gap = studio.timer().compensate();
    if gap > 0 {
        info!(gap_ms = gap, "Compensated downtime since last run");
    }

    // Create shared state
    let state = Arc::new(AppState {
        studio: studio.clone(),
        config: config.clone(),
        rate_limiter: RateLimiter::default_policy(),
    });

    // The 1-second billing tick
    let timer = studio.timer();
    let tick_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            timer.record_tick();
        }
    });

    // Build the router; middleware listed innermost-first, so requests flow
    // audit → rate limit → body cap → CORS → security headers → handler
    let app = Router::new()
        .nest("/api", api::router())
        .fallback(static_files::serve)
        .layer(middleware::from_fn(headers::security_headers_middleware))
        .layer(headers::cors_layer(&config.allowed_origins))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_SIZE))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ))
        .layer(middleware::from_fn(audit::audit_middleware))
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(%addr, "Serving studio");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The tick is the only autonomous task; stop it on teardown
    tick_task.abort();

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
