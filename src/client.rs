//! Dashboard REST API Client
//!
//! HTTP client for the read-only hospital resource backend. Every resource
//! endpoint answers with an [`ApiEnvelope`]; this module unwraps it and maps
//! transport, status and payload failures onto [`ClientError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::endpoints::{Endpoints, Resource};
use crate::models::{
    Alert, AlertFilter, ApiEnvelope, HealthStatus, Hospital, Medicine, ShortageTrend,
};

/// Read operations the dashboard views depend on.
///
/// The sync engine only sees this trait, so views can be driven by the HTTP
/// client or by an in-process fake.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_hospitals(&self) -> ClientResult<Vec<Hospital>>;

    async fn fetch_medicines(&self, search: Option<&str>, limit: usize)
        -> ClientResult<Vec<Medicine>>;

    async fn fetch_alerts(&self, filter: AlertFilter) -> ClientResult<Vec<Alert>>;

    async fn fetch_critical_alerts(&self) -> ClientResult<Vec<Alert>>;

    async fn fetch_shortage_trends(&self) -> ClientResult<ShortageTrend>;

    async fn health(&self) -> ClientResult<HealthStatus>;
}

/// HTTP implementation of [`DashboardApi`]
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Arc<Endpoints>,
}

impl ApiClient {
    /// Create a client with the given per-request timeout
    pub fn new(endpoints: Arc<Endpoints>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET a resource and unwrap its envelope
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: Resource,
    ) -> ClientResult<T> {
        tracing::debug!(resource = %resource, url = %url, "Fetching resource");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse {
                resource,
                message: e.to_string(),
            })?;

        if !envelope.success {
            return Err(ClientError::Unsuccessful(
                envelope
                    .error
                    .unwrap_or_else(|| format!("{} request was not successful", resource)),
            ));
        }

        tracing::debug!(
            resource = %resource,
            count = ?envelope.count,
            source = ?envelope.source,
            "Resource fetched"
        );

        envelope.data.ok_or_else(|| ClientError::Parse {
            resource,
            message: "response has no data".to_string(),
        })
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn fetch_hospitals(&self) -> ClientResult<Vec<Hospital>> {
        self.get_envelope(&self.endpoints.hospitals, Resource::Hospitals)
            .await
    }

    async fn fetch_medicines(
        &self,
        search: Option<&str>,
        limit: usize,
    ) -> ClientResult<Vec<Medicine>> {
        let url = self.endpoints.medicines_query(search, limit);
        self.get_envelope(&url, Resource::Medicines).await
    }

    async fn fetch_alerts(&self, filter: AlertFilter) -> ClientResult<Vec<Alert>> {
        let url = self.endpoints.alerts_query(filter.query_value());
        self.get_envelope(&url, Resource::Alerts).await
    }

    async fn fetch_critical_alerts(&self) -> ClientResult<Vec<Alert>> {
        self.get_envelope(&self.endpoints.critical_alerts, Resource::CriticalAlerts)
            .await
    }

    async fn fetch_shortage_trends(&self) -> ClientResult<ShortageTrend> {
        self.get_envelope(&self.endpoints.shortage_trends, Resource::ShortageTrends)
            .await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .client
            .get(&self.endpoints.health)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| ClientError::Parse {
            resource: Resource::Health,
            message: e.to_string(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request unsuccessful: {0}")]
    Unsuccessful(String),

    #[error("Unexpected {resource} payload: {message}")]
    Parse { resource: Resource, message: String },
}

impl ClientError {
    /// Network-level failure as opposed to an answer from the backend
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Unavailable(_) | ClientError::Timeout | ClientError::Request(_)
        )
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
