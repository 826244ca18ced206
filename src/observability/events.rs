//! Observable service events
//!
//! Every line the service logs about its own lifecycle or about a request
//! is named by one of these events.

use std::fmt;

/// Observable events in the reasoning service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEvent {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration resolved
    ConfigLoaded,
    /// Configuration could not be loaded (FATAL)
    ConfigInvalid,
    /// HTTP listener bound, ready for requests
    Serving,
    /// Shutdown initiated
    ShutdownStart,

    // Engine
    /// Orchestrator constructed for a license
    EngineInitialized,
    /// Event processed successfully
    EventProcessed,
    /// Event processing failed
    EventFailed,

    // Batches
    /// Batch processed successfully
    BatchProcessed,
    /// Batch rejected before processing
    BatchRejected,
    /// Batch aborted by a failing event
    BatchFailed,

    // Licensing
    /// License replaced
    LicenseUpdated,
    /// Request rejected by the bearer check
    AuthRejected,
}

impl ServiceEvent {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceEvent::BootStart => "DEEPREASON_STARTUP_BEGIN",
            ServiceEvent::ConfigLoaded => "CONFIG_LOADED",
            ServiceEvent::ConfigInvalid => "CONFIG_INVALID",
            ServiceEvent::Serving => "DEEPREASON_SERVING",
            ServiceEvent::ShutdownStart => "SHUTDOWN_START",

            ServiceEvent::EngineInitialized => "ENGINE_INITIALIZED",
            ServiceEvent::EventProcessed => "EVENT_PROCESSED",
            ServiceEvent::EventFailed => "EVENT_FAILED",

            ServiceEvent::BatchProcessed => "BATCH_PROCESSED",
            ServiceEvent::BatchRejected => "BATCH_REJECTED",
            ServiceEvent::BatchFailed => "BATCH_FAILED",

            ServiceEvent::LicenseUpdated => "LICENSE_UPDATED",
            ServiceEvent::AuthRejected => "AUTH_REJECTED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, ServiceEvent::ConfigInvalid)
    }

    /// Returns true if this event reports a failed or rejected operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ServiceEvent::EventFailed
                | ServiceEvent::BatchRejected
                | ServiceEvent::BatchFailed
                | ServiceEvent::AuthRejected
        )
    }
}

impl fmt::Display for ServiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
