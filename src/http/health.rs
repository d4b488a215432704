//! Liveness endpoint.
//!
//! Served before routing, for any method, and never proxied.

use axum::{response::IntoResponse, Json};
use serde::Serialize;

/// Path reserved for the liveness check.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            status: "UP",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Report the gateway as up.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthStatus::up())
}
