//! # Reasoning Orchestrator
//!
//! Composes extraction, pattern matching and synthesis into one
//! deterministic event → result transformation:
//!
//! ```text
//! Event → FeatureExtractor → PatternMatcher → ExplanationSynthesizer
//!       → recommendations → ReasoningResult
//! ```
//!
//! The orchestrator owns no mutable state. The bound license is fixed at
//! construction; a new brand configuration means a new orchestrator.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Logger, ServiceEvent};

use super::errors::{EngineResult, ReasoningError};
use super::event::Event;
use super::extractor::FeatureExtractor;
use super::feature::{FeatureValue, SymbolicFeature};
use super::license::LicenseConfig;
use super::patterns::{PatternMatcher, ReasoningStep};
use super::synthesizer::ExplanationSynthesizer;

/// Version tag stamped on every result
pub const MODEL_VERSION: &str = "1.0.0";

/// Maximum number of recommended actions per result
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Significance reported when the chain produced no assessment
const DEFAULT_SIGNIFICANCE: f64 = 0.5;

/// Complete interpretation of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub event_id: String,
    pub processed_at: DateTime<Utc>,
    pub symbolic_features: Vec<SymbolicFeature>,
    pub reasoning_steps: Vec<ReasoningStep>,
    pub meaning: String,
    pub human_explanation: String,
    /// Overall significance in [0.0, 1.0]
    pub significance_score: f64,
    /// At most three entries, highest priority first
    pub recommended_actions: Vec<String>,
    pub processing_time_ms: f64,
    pub model_version: String,
}

impl ReasoningResult {
    /// Check the pipeline invariants on an assembled result
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |detail: String| Err(ReasoningError::invariant(&self.event_id, detail));

        if !in_unit_range(self.significance_score) {
            return fail(format!(
                "significance_score {} outside [0, 1]",
                self.significance_score
            ));
        }

        if let Some(f) = self.symbolic_features.iter().find(|f| !in_unit_range(f.confidence)) {
            return fail(format!(
                "feature '{}' confidence {} outside [0, 1]",
                f.feature_name, f.confidence
            ));
        }

        for (index, step) in self.reasoning_steps.iter().enumerate() {
            if step.step_id as usize != index + 1 {
                return fail(format!(
                    "step ids not contiguous: position {} has id {}",
                    index + 1,
                    step.step_id
                ));
            }
            if !in_unit_range(step.confidence) {
                return fail(format!(
                    "step {} confidence {} outside [0, 1]",
                    step.step_id, step.confidence
                ));
            }
        }

        if self.recommended_actions.len() > MAX_RECOMMENDATIONS {
            return fail(format!(
                "{} recommended actions exceed the limit of {}",
                self.recommended_actions.len(),
                MAX_RECOMMENDATIONS
            ));
        }

        Ok(())
    }
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Derive recommended actions, in priority order, capped at three
pub fn recommend(significance: f64, features: &[SymbolicFeature]) -> Vec<String> {
    let mut actions: Vec<&str> = Vec::new();

    if significance > 0.7 {
        actions.push("Review this event for potential security implications");
        actions.push("Consider alerting relevant personnel");
    } else if significance > 0.4 {
        actions.push("Log this event for pattern analysis");
        actions.push("Monitor for similar events in the area");
    } else {
        actions.push("Archive as routine activity");
    }

    // Any feature whose value is "night" counts, not only the time bucket.
    if features
        .iter()
        .any(|f| matches!(&f.feature_value, FeatureValue::Text(v) if v == "night"))
    {
        actions.push("Increase monitoring sensitivity during night hours");
    }

    if features.iter().any(|f| f.feature_name.contains("social")) {
        actions.push("Consider social dynamics in area planning");
    }

    actions.truncate(MAX_RECOMMENDATIONS);
    actions.into_iter().map(String::from).collect()
}

/// Runs the full reasoning pipeline for one license
#[derive(Debug, Clone)]
pub struct ReasoningOrchestrator {
    extractor: FeatureExtractor,
    matcher: PatternMatcher,
    synthesizer: ExplanationSynthesizer,
}

impl Default for ReasoningOrchestrator {
    fn default() -> Self {
        Self::build(None)
    }
}

impl ReasoningOrchestrator {
    /// Create an orchestrator bound to a license
    pub fn new(license: LicenseConfig) -> Self {
        Self::build(Some(license))
    }

    fn build(license: Option<LicenseConfig>) -> Self {
        let brand = license
            .as_ref()
            .map(|l| l.brand_name.clone())
            .unwrap_or_else(|| "None".to_string());
        log_event_with_fields(ServiceEvent::EngineInitialized, &[("brand", brand.as_str())]);

        Self {
            extractor: FeatureExtractor::new(),
            matcher: PatternMatcher::new(),
            synthesizer: ExplanationSynthesizer::new(license),
        }
    }

    /// The bound license, if any
    pub fn license(&self) -> Option<&LicenseConfig> {
        self.synthesizer.license()
    }

    /// Process one event.
    ///
    /// Internal failures are logged and returned unchanged; no partial
    /// result is produced.
    pub fn process(&self, event: &Event) -> EngineResult<ReasoningResult> {
        let started = Instant::now();

        let event_id = event.event_id.as_str();

        let features = self.extractor.extract(event);
        let count = features.len().to_string();
        Logger::trace("FEATURES_EXTRACTED", &[("count", count.as_str()), ("event_id", event_id)]);

        let steps = self.matcher.process(&features);
        let count = steps.len().to_string();
        Logger::trace(
            "REASONING_STEPS_COMPLETE",
            &[("count", count.as_str()), ("event_id", event_id)],
        );

        let (meaning, human_explanation) = self.synthesizer.synthesize(event, &features, &steps);

        let significance_score = steps
            .last()
            .map(|s| s.significance_score().unwrap_or(DEFAULT_SIGNIFICANCE))
            .unwrap_or(DEFAULT_SIGNIFICANCE);
        let recommended_actions = recommend(significance_score, &features);

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let result = ReasoningResult {
            event_id: event.event_id.clone(),
            processed_at: Utc::now(),
            symbolic_features: features,
            reasoning_steps: steps,
            meaning,
            human_explanation,
            significance_score,
            recommended_actions,
            processing_time_ms,
            model_version: MODEL_VERSION.to_string(),
        };

        if let Err(e) = result.validate() {
            let reason = e.to_string();
            Logger::error(
                ServiceEvent::EventFailed.as_str(),
                &[("error", reason.as_str()), ("event_id", event_id)],
            );
            return Err(e);
        }

        let elapsed = format!("{:.2}", processing_time_ms);
        log_event_with_fields(
            ServiceEvent::EventProcessed,
            &[("event_id", event_id), ("processing_time_ms", elapsed.as_str())],
        );
        Ok(result)
    }
}
