//! # Carewatch
//!
//! Hospital resource dashboard: polls a REST backend for bed availability,
//! medicine stock and shortage alerts, and renders them in the terminal.
//!
//! ## Modules
//!
//! - [`endpoints`]: Base URL to per-resource URL mapping
//! - [`client`]: Typed HTTP client for the backend
//! - [`sync`]: Polling data-sync engine (interval, debounce, filter-triggered)
//! - [`filters`]: Search, availability tiers, recency and pagination
//! - [`render`]: Badges, cards and text charts
//! - [`views`]: Mounted views wiring sync, filters and rendering together
//! - [`shell`]: Interactive navigation shell
//! - [`server`]: Local development backend with mock data
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carewatch::{ApiClient, Config, HospitalView, TextBarChart};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(
//!         Arc::new(config.api.endpoints()),
//!         config.api.request_timeout(),
//!     )?;
//!
//!     // Polls every 30 seconds until dropped
//!     let mut view = HospitalView::mount(Arc::new(client), &config.polling);
//!     view.changed().await;
//!     view.changed().await;
//!
//!     println!("{}", view.render(&TextBarChart::default()));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod filters;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod shell;
pub mod sync;
pub mod views;

// Re-export top-level types for convenience
pub use client::{ApiClient, ClientError, ClientResult, DashboardApi};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, PollingConfig};

pub use endpoints::{Endpoints, Resource, DEFAULT_API_BASE};

pub use models::{
    Alert, AlertFeed, AlertFilter, AlertType, ApiEnvelope, HealthStatus, Hospital, Medicine,
    Severity, ShortageTrend, StockLevel,
};

pub use filters::{
    AlertDigest, BedStatus, HospitalListing, MedicineListing, Page, Pager, MEDICINE_PAGE_SIZE,
};

pub use render::{ChartData, ChartRenderer, TextBarChart};

pub use sync::{SyncCell, SyncHandle, SyncPolicy, ViewState};

pub use views::{AlertView, HospitalView, MedicineView, MountedView, Route};

pub use shell::{Command, Shell};

pub use server::{build_router, AppState, ServerConfig, ServerError};
