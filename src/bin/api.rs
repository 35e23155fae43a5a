//! Carewatch Development Backend
//!
//! Run with: cargo run --bin carewatch-api
//!
//! # Configuration
//!
//! Environment variables:
//! - `CAREWATCH_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CAREWATCH_PORT`: Port to listen on (default: 5000)
//! - `RUST_LOG`: Log filter (default: carewatch=info,tower_http=debug)

use carewatch::server::{serve, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carewatch=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Carewatch dev backend v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = ServerConfig::from_env();
    tracing::info!("Dashboard clients should use http://{}/api", config.addr());

    let state = AppState::new(config.clone());
    serve(state, &config).await?;

    tracing::info!("Carewatch dev backend stopped");
    Ok(())
}
