//! Gateway Health API
//!
//! Exposes a public endpoint reporting process uptime, catalog size, and
//! the configured vision provider.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub uptime_seconds: u64,
    pub catalog_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_provider: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        catalog_size: state.catalog.len(),
        vision_provider: state.labels.as_ref().map(|p| p.name().to_string()),
        timestamp: Utc::now(),
    })
}
