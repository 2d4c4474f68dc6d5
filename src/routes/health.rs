use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Liveness only; storage is not touched.
async fn health_check() -> ApiResult<HealthResponse> {
    ApiResponse::ok(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}
