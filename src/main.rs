//! Cache Gateway - an HTTP front for a Redis response cache
//!
//! Binary entry point: loads configuration, connects the store and serves
//! the API until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_gateway::{
    create_router, spawn_cleanup_task, AppState, Config, KeyValueStore, MemoryStore, RedisStore,
    StoreBackend,
};

/// Main entry point for the cache gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration
/// 3. Connect the store and check it answers
/// 4. Create Axum router with all endpoints
/// 5. Serve until SIGINT/SIGTERM, then shut down gracefully
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache gateway");

    let config = Config::load().context("failed to load configuration")?;
    info!(
        "Configuration loaded: backend={:?}, redis={}:{} (tls={}), default_ttl={}s, port={}",
        config.backend, config.redis_host, config.redis_port, config.redis_tls, config.ttl, config.server_port
    );

    let (store, cleanup_handle) = connect_store(&config).await?;
    store.ping().await.with_context(|| {
        format!(
            "{} store did not answer PING at startup",
            store.backend_name()
        )
    })?;
    info!("{} store ready", store.backend_name());

    let app = create_router(AppState::new(store, config.ttl));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("cache API is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured store. The in-process store also gets its sweeper.
async fn connect_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn KeyValueStore>, Option<JoinHandle<()>>)> {
    match config.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(config).await.with_context(|| {
                format!(
                    "failed to connect with redis instance at {}:{}",
                    config.redis_host, config.redis_port
                )
            })?;
            info!("Connected to redis at {}", store.address());
            let store: Arc<dyn KeyValueStore> = Arc::new(store);
            Ok((store, None))
        }
        StoreBackend::Memory => {
            warn!("Using the in-process store; cached values are lost on restart");
            let store = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            let store: Arc<dyn KeyValueStore> = store;
            Ok((store, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
