//! Content Gate - Rate limiting and search caching for content front ends
//!
//! Binary entry point: loads configuration, seeds the search index, starts
//! the sweep tasks, and serves the HTTP API.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_gate::api::{create_router, AppState};
use content_gate::search::SearchIndex;
use content_gate::{spawn_cache_sweep_task, spawn_limiter_sweep_task, Config};

/// Main entry point for the Content Gate server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Seed the search index from the optional content file
/// 4. Create limiter and cache with configured parameters
/// 5. Start background sweep tasks
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_gate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Content Gate server");

    // Invalid configuration aborts startup here rather than surfacing as
    // odd limiter or cache behavior later
    let config = Config::from_env().context("configuration error")?;
    info!(
        "Configuration loaded: max_requests={}, window={}ms, block={}ms, cache_ttl={}ms, port={}",
        config.max_requests,
        config.window_ms,
        config.block_duration_ms,
        config.cache_ttl_ms,
        config.server_port
    );

    let index = load_index(&config)?;
    info!("Search index ready with {} documents", index.len());

    // Create application state with limiter and cache
    let state = AppState::from_config(&config, index);

    // Start background sweep tasks
    let cache_sweep_handle = spawn_cache_sweep_task(
        state.cache.clone(),
        Duration::from_millis(config.cache_sweep_interval_ms),
    );
    let limiter_sweep_handle = spawn_limiter_sweep_task(
        state.limiter.clone(),
        Duration::from_millis(config.limiter_sweep_interval_ms),
    );
    info!("Background sweep tasks started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(vec![
            cache_sweep_handle,
            limiter_sweep_handle,
        ]))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the search index from the configured content file, or empty.
fn load_index(config: &Config) -> anyhow::Result<SearchIndex> {
    match &config.content_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read content file {path}"))?;
            SearchIndex::from_json(&json)
                .with_context(|| format!("failed to parse content file {path}"))
        }
        None => {
            warn!("CONTENT_FILE not set, starting with an empty search index");
            Ok(SearchIndex::default())
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep tasks and allows graceful shutdown.
async fn shutdown_signal(sweep_handles: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep tasks
    for handle in sweep_handles {
        handle.abort();
    }
    warn!("Sweep tasks aborted");
}
