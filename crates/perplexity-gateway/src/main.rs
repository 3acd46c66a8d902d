//! Perplexity Gateway - REST API in front of the chat client
//!
//! Environment Variables:
//!     PERPLEXITY_API_KEY: API key for the upstream service (required for all call routes)
//!     PERPLEXITY_BASE_URL: Chat completions endpoint
//!     BIND_ADDR: Listen address (default: 0.0.0.0)
//!     BIND_PORT: Listen port (default: 8000)
//!     RUST_LOG: Log filter (default: info,tower_http=warn)

mod api;
mod server_config;

use std::path::Path;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::api::{create_router, AppState};
use crate::server_config::{load_env_file, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,axum=warn,tower_http=warn"));
    fmt().with_env_filter(filter).compact().with_target(false).init();

    load_env_file(Path::new(".env"));
    let cfg = GatewayConfig::from_env();
    cfg.log_summary();

    let state = AppState::new(cfg.build_client());
    let app = create_router(state);

    let addr = cfg.socket_addr()?;
    info!("listening on http://{}", addr);

    axum::serve(TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
