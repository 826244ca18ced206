//! Observability HTTP Routes
//!
//! Service info, health and metrics. None of these require a license.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::observability::MetricsSnapshot;
use crate::reasoning::MODEL_VERSION;

use super::state::ServiceState;

/// Error rate above which the service reports `degraded`
pub const DEGRADED_ERROR_RATE: f64 = 0.1;

/// Error rate above which the service reports `unhealthy`
pub const UNHEALTHY_ERROR_RATE: f64 = 0.25;

const SERVICE_NAME: &str = "Deep Reason Metacognition Engine";
const SERVICE_DESCRIPTION: &str =
    "Embeddable AI reasoning engine for hardware and object detection systems";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub average_response_time_ms: f64,
    pub requests_processed: u64,
    pub error_rate: f64,
}

/// Metrics response: raw counters plus derived rates
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub average_response_time_ms: f64,
    pub error_rate: f64,
    pub uptime_seconds: f64,
}

/// Create observability routes
pub fn observability_routes(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/", get(info_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health status label for an error rate
pub fn health_status(error_rate: f64) -> &'static str {
    if error_rate > UNHEALTHY_ERROR_RATE {
        "unhealthy"
    } else if error_rate > DEGRADED_ERROR_RATE {
        "degraded"
    } else {
        "healthy"
    }
}

/// Service info handler
async fn info_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": SERVICE_NAME,
        "version": MODEL_VERSION,
        "description": SERVICE_DESCRIPTION,
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "metrics": "/metrics",
            "process_event": "/api/v1/process",
            "batch_process": "/api/v1/batch-process",
            "configure_license": "/api/v1/license"
        }
    }))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<ServiceState>>) -> Json<HealthResponse> {
    let snapshot = state.metrics().snapshot();
    let error_rate = snapshot.error_rate();

    Json(HealthResponse {
        status: health_status(error_rate).to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: MODEL_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        average_response_time_ms: snapshot.average_response_time_ms(),
        requests_processed: snapshot.requests,
        error_rate,
    })
}

/// Metrics handler
async fn metrics_handler(State(state): State<Arc<ServiceState>>) -> Json<MetricsResponse> {
    let counters = state.metrics().snapshot();
    Json(MetricsResponse {
        counters,
        average_response_time_ms: counters.average_response_time_ms(),
        error_rate: counters.error_rate(),
        uptime_seconds: state.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_thresholds() {
        assert_eq!(health_status(0.0), "healthy");
        assert_eq!(health_status(0.1), "healthy");
        assert_eq!(health_status(0.11), "degraded");
        assert_eq!(health_status(0.25), "degraded");
        assert_eq!(health_status(0.26), "unhealthy");
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            timestamp: "2024-01-15T23:00:00+00:00".to_string(),
            version: "1.0.0".to_string(),
            uptime_seconds: 1.5,
            average_response_time_ms: 0.0,
            requests_processed: 0,
            error_rate: 0.0,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("uptime_seconds"));
    }
}
