//! Batch processing.
//!
//! A batch is checked against [`MAX_BATCH_SIZE`] before any event is
//! processed. Results come back in input order and the first failing event
//! aborts the whole batch.

use super::errors::{EngineResult, ReasoningError};
use super::event::Event;
use super::orchestrator::{ReasoningOrchestrator, ReasoningResult};

/// Maximum number of events accepted in one batch
pub const MAX_BATCH_SIZE: usize = 100;

/// Reject oversize batches
pub fn check_batch_size(size: usize) -> EngineResult<()> {
    if size > MAX_BATCH_SIZE {
        return Err(ReasoningError::BatchTooLarge {
            size,
            limit: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}

/// Process a batch of events with one orchestrator
pub fn process_batch(
    orchestrator: &ReasoningOrchestrator,
    events: &[Event],
) -> EngineResult<Vec<ReasoningResult>> {
    check_batch_size(events.len())?;
    events.iter().map(|event| orchestrator.process(event)).collect()
}
