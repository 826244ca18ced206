//! Request metrics for the reasoning service
//!
//! - Counters only, monotonic
//! - One registry per running service, never process-global
//! - Lock-free (relaxed atomics)

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Operational counters of one service instance
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// HTTP requests handled
    requests: AtomicU64,
    /// Requests that ended in a server error
    request_errors: AtomicU64,
    /// Sum of request durations, in microseconds
    response_time_micros: AtomicU64,
    /// Events processed successfully
    events_processed: AtomicU64,
    /// Events whose processing failed
    events_failed: AtomicU64,
    /// Batches processed successfully
    batches_processed: AtomicU64,
    /// Batches rejected for size
    batches_rejected: AtomicU64,
    /// Requests rejected by the bearer check
    auth_rejections: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request
    pub fn record_request(&self, elapsed: Duration, server_error: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.response_time_micros.fetch_add(micros, Ordering::Relaxed);
        if server_error {
            self.request_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_events_processed(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_events_processed(&self, count: u64) {
        self.events_processed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_events_failed(&self) {
        self.events_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_batches_processed(&self) {
        self.batches_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_batches_rejected(&self) {
        self.batches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_auth_rejections(&self) {
        self.auth_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            request_errors: self.request_errors.load(Ordering::Relaxed),
            response_time_micros: self.response_time_micros.load(Ordering::Relaxed),
            events_processed: self.events_processed.load(Ordering::Relaxed),
            events_failed: self.events_failed.load(Ordering::Relaxed),
            batches_processed: self.batches_processed.load(Ordering::Relaxed),
            batches_rejected: self.batches_rejected.load(Ordering::Relaxed),
            auth_rejections: self.auth_rejections.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub request_errors: u64,
    pub response_time_micros: u64,
    pub events_processed: u64,
    pub events_failed: u64,
    pub batches_processed: u64,
    pub batches_rejected: u64,
    pub auth_rejections: u64,
}

impl MetricsSnapshot {
    /// Mean request duration in milliseconds (0 when idle)
    pub fn average_response_time_ms(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.response_time_micros as f64 / self.requests as f64 / 1000.0
    }

    /// Fraction of requests that ended in a server error (0 when idle)
    pub fn error_rate(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.request_errors as f64 / self.requests as f64
    }
}
