//! # Reasoning Errors
//!
//! Error types for the reasoning pipeline.
//!
//! Input degradation (unknown objects, missing fields, absent location) is
//! never an error. Only internal failures and host-side batch rejection
//! surface here.

use thiserror::Error;

/// Result type for reasoning operations
pub type EngineResult<T> = Result<T, ReasoningError>;

/// Reasoning pipeline errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReasoningError {
    /// An assembled result broke a pipeline invariant
    #[error("Invariant violated for event {event_id}: {detail}")]
    InvariantViolation { event_id: String, detail: String },

    /// Batch exceeds the maximum number of events
    #[error("Batch size cannot exceed {limit} events (got {size})")]
    BatchTooLarge { size: usize, limit: usize },
}

impl ReasoningError {
    /// Create an invariant violation error
    pub fn invariant(event_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            event_id: event_id.into(),
            detail: detail.into(),
        }
    }

    /// Returns the HTTP status code a host should map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            ReasoningError::BatchTooLarge { .. } => 400,
            ReasoningError::InvariantViolation { .. } => 500,
        }
    }

    /// Whether the failure is caused by the caller rather than the engine
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
