//! Health check and metrics endpoints
//!
//! Provides Kubernetes-compatible health check endpoints:
//! - /health - Basic health check
//! - /health/ready - Readiness probe (pings the store)
//! - /health/live - Liveness probe (always returns OK if server is running)
//! - /metrics - Prometheus exposition

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

/// Dependencies probed by readiness
#[derive(Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
    pub ai: CheckStatus,
}

/// Outcome of one probe
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    pub detail: String,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

/// Readiness probe
///
/// 503 when the store does not answer a ping. The AI provider is reported
/// but never fails readiness.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = match state.store().ping().await {
        Ok(()) => CheckStatus {
            status: "healthy",
            detail: state.store().backend_name().to_string(),
        },
        Err(e) => CheckStatus {
            status: "unhealthy",
            detail: format!("{:#}", e),
        },
    };
    let provider = state.ai().provider_name();
    let ai = CheckStatus {
        status: if provider == "disabled" { "disabled" } else { "configured" },
        detail: provider.to_string(),
    };

    let ready = store.status == "healthy";
    let code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let mut response = HealthResponse::plain(if ready { "ready" } else { "not_ready" });
    response.checks = Some(HealthChecks { store, ai });

    (code, Json(response))
}

/// Liveness probe, OK whenever the process can answer
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
