//! Dev Backend Routes

pub mod alerts;
pub mod health;
pub mod hospitals;
pub mod medicines;

use axum::http::Uri;

use crate::server::error::ServerError;

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}
