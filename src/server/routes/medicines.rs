//! GET /api/medicines
//!
//! Fallback medicine catalog, searched by name and truncated to `limit`.
//! Low-stock and recalled medicines raise alerts.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::filters::filter_by_term;
use crate::models::{ApiEnvelope, Medicine};
use crate::server::data;
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MedicinesQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn list_medicines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MedicinesQuery>,
) -> ServerResult<Json<ApiEnvelope<Vec<Medicine>>>> {
    let limit = query.limit.unwrap_or(state.config.default_medicine_limit);
    if limit == 0 {
        return Err(ServerError::Validation("limit must be at least 1".to_string()));
    }

    let term = query.search.as_deref().unwrap_or("");
    let medicines = filter_by_term(&data::medicines(), term);

    let raised = state
        .alerts
        .write()
        .await
        .record_medicines(&medicines, Utc::now());
    tracing::debug!(search = %term, count = medicines.len(), raised, "Serving medicines");

    let page: Vec<Medicine> = medicines.into_iter().take(limit).collect();
    let count = page.len();
    Ok(Json(
        ApiEnvelope::ok(page)
            .with_count(count)
            .with_source("fallback"),
    ))
}
