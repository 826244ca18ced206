//! Reasoning HTTP Routes
//!
//! Single-event and batch processing under `/api/v1`.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Logger, ServiceEvent};
use crate::reasoning::{check_batch_size, process_batch, Event, ReasoningResult};

use super::auth::authorize;
use super::errors::{ApiError, ApiResult};
use super::state::ServiceState;

/// Reasoning routes with shared state
pub fn reasoning_routes(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .route("/batch-process", post(batch_handler))
        .with_state(state)
}

/// Batch response body
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub status: String,
    pub batch_id: String,
    pub processed_count: usize,
    pub results: Vec<ReasoningResult>,
}

/// Process one event
async fn process_handler(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
    Json(event): Json<Event>,
) -> ApiResult<Json<ReasoningResult>> {
    let engine = authorize(&state, &headers)?;

    match engine.process(&event) {
        Ok(result) => {
            state.metrics().increment_events_processed();
            Ok(Json(result))
        }
        Err(e) => {
            state.metrics().increment_events_failed();
            Err(ApiError::from(e))
        }
    }
}

/// Process up to 100 events in order
async fn batch_handler(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
    Json(events): Json<Vec<Event>>,
) -> ApiResult<Json<BatchResponse>> {
    let engine = authorize(&state, &headers)?;
    let batch_id = Uuid::new_v4().to_string();
    let size = events.len().to_string();

    if let Err(e) = check_batch_size(events.len()) {
        state.metrics().increment_batches_rejected();
        log_event_with_fields(
            ServiceEvent::BatchRejected,
            &[("batch_id", batch_id.as_str()), ("size", size.as_str())],
        );
        return Err(ApiError::from_batch(e));
    }

    let results = match process_batch(&engine, &events) {
        Ok(results) => results,
        Err(e) => {
            state.metrics().increment_events_failed();
            let reason = e.to_string();
            Logger::error(
                ServiceEvent::BatchFailed.as_str(),
                &[("batch_id", batch_id.as_str()), ("error", reason.as_str())],
            );
            return Err(ApiError::from_batch(e));
        }
    };

    state.metrics().add_events_processed(results.len() as u64);
    state.metrics().increment_batches_processed();
    log_event_with_fields(
        ServiceEvent::BatchProcessed,
        &[("batch_id", batch_id.as_str()), ("size", size.as_str())],
    );

    Ok(Json(BatchResponse {
        status: "success".to_string(),
        batch_id,
        processed_count: results.len(),
        results,
    }))
}
