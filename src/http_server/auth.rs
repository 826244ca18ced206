//! Bearer license check
//!
//! The bearer token must equal the active license key. The comparison runs
//! in constant time.

use std::sync::Arc;

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

use crate::observability::{log_event_with_fields, ServiceEvent};
use crate::reasoning::ReasoningOrchestrator;

use super::errors::{ApiError, ApiResult};
use super::state::ServiceState;

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim_start();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Constant-time comparison of two strings
pub fn keys_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Authorize a request against the active license.
///
/// Returns the orchestrator the request must use for its whole lifetime.
pub fn authorize(state: &ServiceState, headers: &HeaderMap) -> ApiResult<Arc<ReasoningOrchestrator>> {
    let token = match bearer_token(headers) {
        Some(t) => t,
        None => return Err(reject(state, ApiError::MissingAuthorization)),
    };

    let engine = state.engine();
    let expected = engine.license().map(|l| l.license_key.as_str()).unwrap_or("");
    if expected.is_empty() || !keys_match(token, expected) {
        return Err(reject(state, ApiError::InvalidLicenseKey));
    }
    Ok(engine)
}

fn reject(state: &ServiceState, err: ApiError) -> ApiError {
    state.metrics().increment_auth_rejections();
    let reason = err.to_string();
    log_event_with_fields(ServiceEvent::AuthRejected, &[("reason", reason.as_str())]);
    err
}
