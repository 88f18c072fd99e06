//! JSON and liveness handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::WebState;

/// Body of `GET /api/v1/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub product: String,
    pub status: String,
    /// Local wall-clock time of the last poll attempt, `HH:MM:SS`.
    pub last_check: Option<String>,
    pub stock_count: u32,
    /// Recent events, newest first, capped at the log capacity.
    pub events: Vec<String>,
}

/// GET /api/v1/status
pub async fn status(State(state): State<WebState>) -> Json<StatusResponse> {
    let snap = state.watch.snapshot().await;
    Json(StatusResponse {
        product: state.product_name.clone(),
        status: snap.status.to_string(),
        last_check: snap.last_check.map(|t| t.format("%H:%M:%S").to_string()),
        stock_count: snap.last_stock_count,
        events: snap.events.iter().map(str::to_string).collect(),
    })
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
