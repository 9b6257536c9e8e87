//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe, pings the repository
//! - /health/live - Liveness probe

use crate::repositories::RepositoryResult;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn response(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(response("healthy", None))
}

/// Database check result. Failure details go to the log, never to the client.
fn database_check(result: RepositoryResult<()>) -> CheckStatus {
    match result {
        Ok(()) => CheckStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            CheckStatus {
                status: "unhealthy".to_string(),
                message: Some("Database unavailable".to_string()),
            }
        }
    }
}

/// Returns 503 when the repository cannot be reached
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = database_check(state.repo().ping().await);
    if database.message.is_none() {
        return Ok(Json(response("ready", Some(HealthChecks { database }))));
    }

    Err((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(response("not_ready", Some(HealthChecks { database }))),
    ))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(response("alive", None))
}
