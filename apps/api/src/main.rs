use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use placement_api::config::Config;
use placement_api::logging::{self, LogTarget};
use placement_api::routes::build_app;
use placement_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    logging::init(&config, LogTarget::Stdout);

    info!("Starting placement API v{}", env!("CARGO_PKG_VERSION"));
    if config.dev_mode {
        info!("Development mode: prompts and generator replies are logged at debug level");
    }

    let state = AppState::from_config(&config).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
