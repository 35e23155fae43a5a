//! Development Backend
//!
//! A local stand-in for the dashboard's REST backend, serving mock data in
//! the same envelope format, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Liveness and server time
//! - `GET /api/hospitals?district=` - Hospital bed availability
//! - `GET /api/medicines?search=&limit=` - Medicine availability
//! - `GET /api/alerts?type=` - Shortage and recall alerts
//! - `GET /api/alerts/critical` - Critical alerts only
//! - `GET /api/trends/shortages` - Six-month shortage trend
//!
//! # Example
//!
//! ```rust,ignore
//! use carewatch::server::{serve, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env();
//!     serve(AppState::new(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod alerts;
pub mod data;
pub mod error;
pub mod routes;
pub mod state;

pub use alerts::AlertCache;
pub use error::{ServerError, ServerResult};
pub use state::{AppState, ServerConfig};

use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/hospitals", get(routes::hospitals::list_hospitals))
        .route("/medicines", get(routes::medicines::list_medicines))
        .route("/alerts", get(routes::alerts::list_alerts))
        .route("/alerts/critical", get(routes::alerts::critical_alerts))
        .route("/trends/shortages", get(routes::alerts::shortage_trends));

    Router::new()
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind to the configured address and serve until Ctrl+C / SIGTERM
pub async fn serve(state: AppState, config: &ServerConfig) -> ServerResult<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    run(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let router = build_router(state);

    tracing::info!("Carewatch dev backend listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Carewatch dev backend shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
