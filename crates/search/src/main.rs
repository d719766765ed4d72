//! Friendly Search Service
//!
//! HTTP service ranking search results by the current user's social graph:
//! - Catalog search over the loaded snapshot
//! - Friendship distance expansion and affinity scoring
//! - Prometheus metrics on a separate port

use anyhow::Context;
use friendly_common::{config::AppConfig, metrics, VERSION};
use friendly_search::{
    handlers::{create_router, AppState},
    CatalogProvider, FriendlySearch, SocialSnapshot,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate()?;

    init_tracing(&config);

    info!(
        "Starting {} v{}",
        config.observability.service_name, VERSION
    );

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets(metrics::LATENCY_BUCKETS)?
            .install()
            .context("failed to install Prometheus exporter")?;
        metrics::register_metrics();
        info!("Metrics exposed on {}", metrics_addr);
    }

    // Load the social snapshot
    let snapshot = match &config.snapshot.path {
        Some(path) => {
            let snapshot = SocialSnapshot::from_json_file(path)
                .with_context(|| format!("failed to load snapshot from {}", path))?;
            info!(
                path = %path,
                people = snapshot.person_count(),
                catalog = snapshot.catalog.len(),
                "Snapshot loaded"
            );
            snapshot
        }
        None => {
            warn!("No snapshot path configured, serving an empty network");
            SocialSnapshot::default()
        }
    };

    let provider = CatalogProvider::new(
        snapshot.catalog.iter().cloned(),
        config.ranking.default_popularity,
    );
    let search = FriendlySearch::new(Arc::new(provider), &config.ranking)?;

    let addr = config.listen_addr()?;
    let state = AppState {
        config: Arc::new(config),
        snapshot: Arc::new(snapshot),
        search: Arc::new(search),
    };

    let app = create_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins over the configured level
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.observability.json_logging {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
