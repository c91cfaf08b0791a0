mod catalog;
mod config;
mod discovery;
mod error;
mod gateway;
mod handlers;
mod model;
mod normalize;
mod stream;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::gateway::Gateway;
use crate::handlers::app;
use crate::stream::YtDlpResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // One catalog client for the whole process; reqwest pools connections internally.
    let catalog = CatalogClient::new(config.catalog_api_url.clone(), config.upstream_timeout)?;
    let streams = YtDlpResolver::new(config.ytdlp_path.clone(), config.upstream_timeout);
    let gateway = Gateway::new(Arc::new(catalog), Arc::new(streams))
        .with_chart_country(config.chart_country.clone())
        .with_randomness(config.randomness);

    let app = app(gateway, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(catalog = %config.catalog_api_url, country = %config.chart_country, "listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutting down");
}
