use gw_server::{AppState, ServerError, ShutdownCoordinator, build_router, logger};

use gw_cache::{CacheStore, MemoryCacheStore};
use gw_config::Config;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting gw-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;
    info!("Prometheus recorder installed");

    let shutdown = ShutdownCoordinator::new();

    // Cache shared by identity, tenant and listing lookups
    let store = MemoryCacheStore::new(config.cache.max_entries);
    {
        let store = store.clone();
        shutdown.spawn_periodic("cache-sweep", config.cache.sweep_interval(), move || {
            let store = store.clone();
            async move {
                let removed = store.purge_expired().await;
                if removed > 0 {
                    debug!("Cache sweep removed {} expired entries", removed);
                }
            }
        });
    }
    let cache: Arc<dyn CacheStore> = Arc::new(store);

    let app_state = AppState::from_config(&config, cache, Some(metrics))?;

    // Forget subjects whose rate limit window has long passed
    if let Some(limiter) = app_state.rate_limiter.clone() {
        shutdown.spawn_periodic("rate-limit-prune", config.rate_limit.window(), move || {
            limiter.prune();
            std::future::ready(())
        });
    }

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let mut guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await?;
    info!("Graceful shutdown complete");

    Ok(())
}
