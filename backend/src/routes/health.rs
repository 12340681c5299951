//! Health check endpoints
//!
//! - /health: process is serving
//! - /health/live: liveness probe, always OK while the server runs
//! - /health/ready: readiness probe, 503 when Postgres is unreachable

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

/// Outcome of the database probe
#[derive(Serialize)]
pub struct DatabaseCheck {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let check = match db::health_check(state.db()).await {
        Ok(()) => DatabaseCheck {
            healthy: true,
            message: None,
        },
        Err(e) => DatabaseCheck {
            healthy: false,
            message: Some(e.to_string()),
        },
    };

    let (status, label) = if check.healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    let mut body = HealthResponse::plain(label);
    body.database = Some(check);
    (status, Json(body))
}
