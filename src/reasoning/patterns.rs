//! # Pattern Matching
//!
//! Metacognitive scoring of symbolic features against a fixed registry of
//! interpretive patterns.
//!
//! Every invocation produces exactly three steps, in order:
//! 1. `feature_aggregation` (confidence 0.9)
//! 2. `pattern_matching` (confidence 0.8)
//! 3. `significance_assessment` (confidence 0.7)
//!
//! Step confidences are constants and do not depend on the data.

use serde::{Deserialize, Serialize};

use super::feature::SymbolicFeature;

/// Minimum fraction of a pattern's triggers that must be present
pub const MATCH_THRESHOLD: f64 = 0.6;

pub const AGGREGATION_CONFIDENCE: f64 = 0.9;
pub const MATCHING_CONFIDENCE: f64 = 0.8;
pub const ASSESSMENT_CONFIDENCE: f64 = 0.7;

/// A named combination of symbols with a meaning and a significance weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternDefinition {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub meaning: &'static str,
    /// Significance weight in [0.0, 1.0]
    pub significance: f64,
}

/// Engine-tuned pattern table, in evaluation order
pub const PATTERN_REGISTRY: &[PatternDefinition] = &[
    PatternDefinition {
        name: "routine_activity",
        triggers: &["human_activity", "morning", "domestic_life"],
        meaning: "routine daily activity",
        significance: 0.3,
    },
    PatternDefinition {
        name: "social_interaction",
        triggers: &["social_presence", "communication"],
        meaning: "social interaction or gathering",
        significance: 0.6,
    },
    PatternDefinition {
        name: "security_event",
        triggers: &["night", "human_activity"],
        meaning: "potential security-relevant event",
        significance: 0.8,
    },
    PatternDefinition {
        name: "lifestyle_activity",
        triggers: &["exercise", "health", "eco_friendly"],
        meaning: "health and lifestyle conscious activity",
        significance: 0.5,
    },
    PatternDefinition {
        name: "modern_life",
        triggers: &["modern_life", "connectivity", "transportation"],
        meaning: "modern lifestyle and technology usage",
        significance: 0.4,
    },
];

/// Reasoning operation performed by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOperation {
    FeatureAggregation,
    PatternMatching,
    SignificanceAssessment,
}

impl StepOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOperation::FeatureAggregation => "feature_aggregation",
            StepOperation::PatternMatching => "pattern_matching",
            StepOperation::SignificanceAssessment => "significance_assessment",
        }
    }
}

/// A pattern that passed the match threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPattern {
    pub name: String,
    /// Fraction of triggers present
    pub match_score: f64,
    pub meaning: String,
    pub significance: f64,
}

/// Input snapshot of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepInput {
    // Listed before `Features` so untagged decoding picks the wider shape.
    PatternScan {
        features: Vec<String>,
        symbols: Vec<String>,
        patterns: Vec<String>,
    },
    Features {
        features: Vec<String>,
    },
    MatchedPatterns {
        matched_patterns: Vec<MatchedPattern>,
    },
}

/// Output snapshot of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepOutput {
    AggregatedFeatures { aggregated_features: Vec<String> },
    MatchedPatterns { matched_patterns: Vec<MatchedPattern> },
    Significance { significance_score: f64 },
}

/// One step of the reasoning chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 1-based, contiguous within one invocation
    pub step_id: u32,
    pub operation: StepOperation,
    pub input_data: StepInput,
    pub output_data: StepOutput,
    pub confidence: f64,
    pub explanation: String,
}

impl ReasoningStep {
    /// Significance score, if this step assessed one
    pub fn significance_score(&self) -> Option<f64> {
        match self.output_data {
            StepOutput::Significance { significance_score } => Some(significance_score),
            _ => None,
        }
    }

    /// Matched patterns, if this step performed matching
    pub fn matched_patterns(&self) -> Option<&[MatchedPattern]> {
        match &self.output_data {
            StepOutput::MatchedPatterns { matched_patterns } => Some(matched_patterns),
            _ => None,
        }
    }
}

/// Symbols a pattern trigger can match: every feature name plus every
/// text feature value, first occurrence order, deduplicated.
pub fn symbol_set(features: &[SymbolicFeature]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    let candidates = features.iter().flat_map(|f| {
        std::iter::once(f.feature_name.as_str()).chain(f.feature_value.as_text())
    });
    for candidate in candidates {
        if !symbols.iter().any(|s| s == candidate) {
            symbols.push(candidate.to_string());
        }
    }
    symbols
}

/// Scores features against a pattern registry
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher {
    registry: &'static [PatternDefinition],
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    /// Matcher over the built-in registry
    pub fn new() -> Self {
        Self::with_registry(PATTERN_REGISTRY)
    }

    /// Matcher over a custom static registry
    pub fn with_registry(registry: &'static [PatternDefinition]) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static [PatternDefinition] {
        self.registry
    }

    /// Evaluate every registry pattern against a symbol set, in registry order
    pub fn match_patterns(&self, symbols: &[String]) -> Vec<MatchedPattern> {
        self.registry
            .iter()
            .filter_map(|pattern| {
                let matches = pattern
                    .triggers
                    .iter()
                    .filter(|trigger| symbols.iter().any(|s| s == *trigger))
                    .count();
                let match_score = matches as f64 / pattern.triggers.len() as f64;

                (match_score >= MATCH_THRESHOLD).then(|| MatchedPattern {
                    name: pattern.name.to_string(),
                    match_score,
                    meaning: pattern.meaning.to_string(),
                    significance: pattern.significance,
                })
            })
            .collect()
    }

    /// Run the three-step reasoning chain
    pub fn process(&self, features: &[SymbolicFeature]) -> Vec<ReasoningStep> {
        let feature_names: Vec<String> =
            features.iter().map(|f| f.feature_name.clone()).collect();
        let symbols = symbol_set(features);

        let aggregation = ReasoningStep {
            step_id: 1,
            operation: StepOperation::FeatureAggregation,
            input_data: StepInput::Features {
                features: feature_names.clone(),
            },
            output_data: StepOutput::AggregatedFeatures {
                aggregated_features: feature_names.clone(),
            },
            confidence: AGGREGATION_CONFIDENCE,
            explanation: format!(
                "Identified {} symbolic features from the event data",
                features.len()
            ),
        };

        let matched = self.match_patterns(&symbols);
        let matching = ReasoningStep {
            step_id: 2,
            operation: StepOperation::PatternMatching,
            input_data: StepInput::PatternScan {
                features: feature_names,
                symbols,
                patterns: self.registry.iter().map(|p| p.name.to_string()).collect(),
            },
            output_data: StepOutput::MatchedPatterns {
                matched_patterns: matched.clone(),
            },
            confidence: MATCHING_CONFIDENCE,
            explanation: format!(
                "Matched {} reasoning patterns based on feature combinations",
                matched.len()
            ),
        };

        // Registry weights are non-negative, so 0.0 doubles as "no match".
        let significance = matched.iter().map(|p| p.significance).fold(0.0, f64::max);
        let assessment = ReasoningStep {
            step_id: 3,
            operation: StepOperation::SignificanceAssessment,
            input_data: StepInput::MatchedPatterns {
                matched_patterns: matched,
            },
            output_data: StepOutput::Significance {
                significance_score: significance,
            },
            confidence: ASSESSMENT_CONFIDENCE,
            explanation: format!(
                "Assessed overall event significance as {:.2} based on pattern analysis",
                significance
            ),
        };

        vec![aggregation, matching, assessment]
    }
}
