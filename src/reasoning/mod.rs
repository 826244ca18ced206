//! # Reasoning Engine
//!
//! The domain core: converts one detection event into a meaning, a prose
//! explanation, a significance score and recommended actions.
//!
//! # Pipeline
//!
//! 1. [`FeatureExtractor`] maps detections, time and location to symbols
//! 2. [`PatternMatcher`] scores symbols against the pattern registry
//! 3. [`ExplanationSynthesizer`] renders meaning and explanation
//! 4. [`ReasoningOrchestrator`] times the run and derives recommendations
//!
//! The pipeline is synchronous and reads only compile-time tables, so one
//! orchestrator can serve concurrent callers without locking.
//!
//! # Usage
//!
//! ```ignore
//! use deepreason::reasoning::{DetectedObject, Event, EventType, LicenseConfig, ReasoningOrchestrator};
//!
//! let engine = ReasoningOrchestrator::new(LicenseConfig::new("Acme", "acme-key"));
//! let event = Event::new("evt-1", EventType::ObjectDetection)
//!     .with_object(DetectedObject::new("person", 0.92));
//! let result = engine.process(&event)?;
//! println!("{}: {}", result.meaning, result.human_explanation);
//! ```

mod batch;
mod errors;
mod event;
mod extractor;
mod feature;
mod license;
mod orchestrator;
mod patterns;
mod synthesizer;

pub use batch::{check_batch_size, process_batch, MAX_BATCH_SIZE};
pub use errors::{EngineResult, ReasoningError};
pub use event::{epoch_timestamp, parse_timestamp, DetectedObject, Event, EventType, Location};
pub use extractor::{
    symbolism_for, FeatureExtractor, TimeOfDay, LOCATION_FEATURE, SYMBOLIC_DISCOUNT,
    TIME_OF_DAY_FEATURE,
};
pub use feature::{FeatureValue, SymbolicFeature};
pub use license::{ExplanationStyle, LicenseConfig, Vocabulary};
pub use orchestrator::{
    recommend, ReasoningOrchestrator, ReasoningResult, MAX_RECOMMENDATIONS, MODEL_VERSION,
};
pub use patterns::{
    symbol_set, MatchedPattern, PatternDefinition, PatternMatcher, ReasoningStep, StepInput,
    StepOperation, StepOutput, MATCH_THRESHOLD, PATTERN_REGISTRY,
};
pub use synthesizer::{meaning_for, ExplanationSynthesizer, BASIC_MEANING};
