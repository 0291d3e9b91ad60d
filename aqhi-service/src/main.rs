use aqhi_service::api_client::AqhiClient;
use aqhi_service::cache::FileCache;
use aqhi_service::pipeline::AqhiPipeline;
use aqhi_service::{config, create_router, handlers};
use common::http_client::HttpClient;
use common::tracing::init_from_format;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env();
    init_from_format(&config.log_format);

    let cache = Arc::new(FileCache::new(config.cache_dir.clone()));
    let http_client = HttpClient::new(config.http_timeout, config.http_max_retries);
    let client = Arc::new(AqhiClient::new(
        http_client,
        cache,
        Duration::from_secs(config.cache_ttl_seconds),
    ));
    let pipeline = Arc::new(AqhiPipeline::new(
        client,
        config.pollutant_url.clone(),
        config.forecast_url.clone(),
    ));

    let app = create_router(handlers::AppState { pipeline });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        cache_dir = %config.cache_dir.display(),
        cache_ttl_seconds = config.cache_ttl_seconds,
        "AQHI service starting on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("AQHI service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    warn!("Shutting down gracefully...");
}
