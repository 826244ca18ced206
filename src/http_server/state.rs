//! Shared service state
//!
//! The active orchestrator sits behind a lock as an `Arc`. Handlers clone
//! the `Arc` once and release the lock, so a license swap never disturbs a
//! request that already holds its engine.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::observability::MetricsRegistry;
use crate::reasoning::{LicenseConfig, ReasoningOrchestrator};

/// State shared by every route
#[derive(Debug)]
pub struct ServiceState {
    engine: RwLock<Arc<ReasoningOrchestrator>>,
    metrics: MetricsRegistry,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl ServiceState {
    /// Create state with an orchestrator bound to `license`
    pub fn new(license: LicenseConfig) -> Self {
        Self {
            engine: RwLock::new(Arc::new(ReasoningOrchestrator::new(license))),
            metrics: MetricsRegistry::new(),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Snapshot of the active orchestrator
    pub fn engine(&self) -> Arc<ReasoningOrchestrator> {
        let guard = self.engine.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install a new orchestrator, returning the one it replaced
    pub fn replace_engine(&self, engine: ReasoningOrchestrator) -> Arc<ReasoningOrchestrator> {
        let mut guard = self.engine.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, Arc::new(engine))
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_old_snapshot_alive() {
        let state = ServiceState::new(LicenseConfig::new("Old", "old-key"));
        let in_flight = state.engine();

        state.replace_engine(ReasoningOrchestrator::new(LicenseConfig::new("New", "new-key")));

        assert_eq!(in_flight.license().unwrap().brand_name, "Old");
        assert_eq!(state.engine().license().unwrap().brand_name, "New");
    }

    #[test]
    fn test_uptime_monotonic() {
        let state = ServiceState::new(LicenseConfig::new("Demo", "k"));
        let first = state.uptime_seconds();
        assert!(state.uptime_seconds() >= first);
    }
}
