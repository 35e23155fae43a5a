//! GET /api/hospitals
//!
//! Mock bed availability, optionally narrowed by `district` (substring,
//! case-insensitive). Serving hospitals raises bed alerts.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ApiEnvelope, Hospital};
use crate::server::data;
use crate::server::error::ServerResult;
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HospitalsQuery {
    #[serde(default)]
    pub district: Option<String>,
}

pub async fn list_hospitals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HospitalsQuery>,
) -> ServerResult<Json<ApiEnvelope<Vec<Hospital>>>> {
    let now = Utc::now();
    let mut hospitals = data::hospitals(now);

    if let Some(district) = query.district.as_deref().filter(|d| !d.is_empty()) {
        let needle = district.to_lowercase();
        hospitals.retain(|h| h.district.to_lowercase().contains(&needle));
    }

    let raised = state.alerts.write().await.record_hospitals(&hospitals, now);
    tracing::debug!(count = hospitals.len(), raised, "Serving hospitals");

    let count = hospitals.len();
    Ok(Json(
        ApiEnvelope::ok(hospitals)
            .with_count(count)
            .with_source("mock_data"),
    ))
}
