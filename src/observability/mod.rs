//! Observability subsystem for the reasoning service
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Per-service request metrics
//! - Named lifecycle and request events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on reasoning results
//! 3. No background threads
//!
//! # Usage
//!
//! ```ignore
//! use deepreason::observability::{log_event_with_fields, Logger, MetricsRegistry, ServiceEvent};
//!
//! Logger::info("REQUEST_RECEIVED", &[("path", "/api/v1/process")]);
//! log_event_with_fields(ServiceEvent::EventProcessed, &[("event_id", "evt-1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_events_processed();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::ServiceEvent;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Severity a service event is logged at
pub fn severity_for(event: ServiceEvent) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: ServiceEvent) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: ServiceEvent, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
