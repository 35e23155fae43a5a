//! Alert Routes
//!
//! - GET /api/alerts?type=bed|medicine - Cached alerts, newest first
//! - GET /api/alerts/critical - Critical alerts only
//! - GET /api/trends/shortages - Alerts per month for the last six months

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{Alert, AlertFilter, ApiEnvelope, ShortageTrend};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertsQuery>,
) -> ServerResult<Json<ApiEnvelope<Vec<Alert>>>> {
    let filter: AlertFilter = query
        .kind
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(ServerError::Validation)?;

    let kind = match filter {
        AlertFilter::All => None,
        AlertFilter::Only(kind) => Some(kind),
    };
    let alerts = state.alerts.read().await.list(kind);

    let count = alerts.len();
    Ok(Json(ApiEnvelope::ok(alerts).with_count(count)))
}

pub async fn critical_alerts(
    State(state): State<Arc<AppState>>,
) -> ServerResult<Json<ApiEnvelope<Vec<Alert>>>> {
    let alerts = state.alerts.read().await.critical();
    let count = alerts.len();
    Ok(Json(ApiEnvelope::ok(alerts).with_count(count)))
}

pub async fn shortage_trends(
    State(state): State<Arc<AppState>>,
) -> ServerResult<Json<ApiEnvelope<ShortageTrend>>> {
    let report = state.alerts.read().await.shortage_trend(Utc::now());
    Ok(Json(ApiEnvelope::ok(report.trend).with_source(report.source)))
}
