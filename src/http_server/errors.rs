//! # API Errors
//!
//! Error types returned by the HTTP handlers. Every error renders as
//! `{"error": ..., "code": ...}` with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reasoning::ReasoningError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No usable `Authorization: Bearer` header
    #[error("Missing authorization header")]
    MissingAuthorization,

    /// Bearer token does not match the active license
    #[error("Invalid license key")]
    InvalidLicenseKey,

    /// Batch exceeds the size limit
    #[error("Batch size cannot exceed {limit} events")]
    BatchTooLarge { limit: usize },

    /// Single event failed in the engine
    #[error("Error processing event: {0}")]
    EventProcessing(String),

    /// Batch aborted by a failing event
    #[error("Error processing batch: {0}")]
    BatchProcessing(String),

    /// Submitted license is unusable
    #[error("Error configuring license: {0}")]
    LicenseRejected(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingAuthorization | ApiError::InvalidLicenseKey => 401,
            ApiError::BatchTooLarge { .. } | ApiError::LicenseRejected(_) => 400,
            ApiError::EventProcessing(_) | ApiError::BatchProcessing(_) => 500,
        }
    }

    /// Map an engine failure on the batch path
    pub fn from_batch(err: ReasoningError) -> Self {
        match err {
            ReasoningError::BatchTooLarge { limit, .. } => ApiError::BatchTooLarge { limit },
            other => ApiError::BatchProcessing(other.to_string()),
        }
    }
}

impl From<ReasoningError> for ApiError {
    fn from(err: ReasoningError) -> Self {
        match err {
            ReasoningError::BatchTooLarge { limit, .. } => ApiError::BatchTooLarge { limit },
            other => ApiError::EventProcessing(other.to_string()),
        }
    }
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_messages() {
        assert_eq!(
            ApiError::MissingAuthorization.to_string(),
            "Missing authorization header"
        );
        assert_eq!(ApiError::InvalidLicenseKey.status_code(), 401);
    }

    #[test]
    fn test_batch_too_large_mapping() {
        let err = ApiError::from_batch(ReasoningError::BatchTooLarge {
            size: 150,
            limit: 100,
        });
        assert_eq!(err.to_string(), "Batch size cannot exceed 100 events");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_engine_failure_is_server_error() {
        let err = ApiError::from(ReasoningError::invariant("evt-1", "step ids"));
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().starts_with("Error processing event: "));
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(&ApiError::InvalidLicenseKey);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Invalid license key");
        assert_eq!(json["code"], 401);
    }
}
