//! Request tracking
//!
//! Counts every request, its duration and whether it ended in a 5xx.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::observability::Logger;

use super::state::ServiceState;

/// Record one request in the service metrics
pub async fn track_requests(
    State(state): State<Arc<ServiceState>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status();
    state.metrics().record_request(elapsed, status.is_server_error());

    let code = status.as_u16().to_string();
    let millis = format!("{:.2}", elapsed.as_secs_f64() * 1000.0);
    Logger::trace(
        "REQUEST_COMPLETE",
        &[
            ("elapsed_ms", millis.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", code.as_str()),
        ],
    );

    response
}
