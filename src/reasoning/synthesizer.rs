//! # Explanation Synthesis
//!
//! Renders features and reasoning steps into a short meaning label and a
//! prose explanation, then applies the brand vocabulary.

use super::event::Event;
use super::extractor::{LOCATION_FEATURE, TIME_OF_DAY_FEATURE};
use super::feature::SymbolicFeature;
use super::license::{ExplanationStyle, LicenseConfig};
use super::patterns::{MatchedPattern, ReasoningStep, StepOperation};

/// Maximum number of symbolic descriptions quoted in an explanation
const MAX_SYMBOL_DESCRIPTIONS: usize = 3;

/// Meaning label for a significance score
pub fn meaning_for(significance: f64) -> &'static str {
    if significance > 0.7 {
        "Significant event requiring attention"
    } else if significance > 0.4 {
        "Notable activity with moderate importance"
    } else {
        "Routine activity with standard patterns"
    }
}

/// Meaning used when no reasoning steps exist
pub const BASIC_MEANING: &str = "Event detected with basic object recognition";

/// Produces `(meaning, explanation)` pairs
#[derive(Debug, Clone)]
pub struct ExplanationSynthesizer {
    license: Option<LicenseConfig>,
    style: ExplanationStyle,
}

impl Default for ExplanationSynthesizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ExplanationSynthesizer {
    pub fn new(license: Option<LicenseConfig>) -> Self {
        let style = license
            .as_ref()
            .map(|l| l.explanation_style.clone())
            .unwrap_or_default();
        Self { license, style }
    }

    pub fn style(&self) -> &ExplanationStyle {
        &self.style
    }

    pub fn license(&self) -> Option<&LicenseConfig> {
        self.license.as_ref()
    }

    pub fn synthesize(
        &self,
        event: &Event,
        features: &[SymbolicFeature],
        steps: &[ReasoningStep],
    ) -> (String, String) {
        let meaning = match steps.last() {
            Some(last) => meaning_for(last.significance_score().unwrap_or(0.0)),
            None => BASIC_MEANING,
        };

        let mut parts: Vec<String> = Vec::new();

        let time_description = features
            .iter()
            .find(|f| f.feature_name == TIME_OF_DAY_FEATURE)
            .map(|f| f.human_description.as_str())
            .unwrap_or("at an unspecified time");
        parts.push(format!("An event was detected {}.", time_description));

        if let Some(sentence) = object_sentence(event) {
            parts.push(sentence);
        }

        let descriptions: Vec<String> = features
            .iter()
            .filter(|f| f.feature_name != TIME_OF_DAY_FEATURE && f.feature_name != LOCATION_FEATURE)
            .take(MAX_SYMBOL_DESCRIPTIONS)
            .map(|f| f.human_description.to_lowercase())
            .collect();
        if !descriptions.is_empty() {
            parts.push(format!("This suggests {}.", descriptions.join("; ")));
        }

        let primary = steps
            .iter()
            .find(|s| s.operation == StepOperation::PatternMatching)
            .and_then(|s| s.matched_patterns())
            .and_then(primary_pattern);
        if let Some(pattern) = primary {
            parts.push(format!(
                "The analysis indicates this represents {}.",
                pattern.meaning
            ));
        }

        let mut explanation = parts.join(" ");
        if let Some(license) = &self.license {
            if !license.custom_vocabulary.is_empty() {
                explanation = license.custom_vocabulary.apply(&explanation);
            }
        }

        (meaning.to_string(), explanation)
    }
}

/// Highest match score; the earliest pattern wins ties
fn primary_pattern(patterns: &[MatchedPattern]) -> Option<&MatchedPattern> {
    patterns.iter().fold(None, |best, p| match best {
        Some(b) if b.match_score >= p.match_score => Some(b),
        _ => Some(p),
    })
}

fn object_sentence(event: &Event) -> Option<String> {
    let names: Vec<&str> = event
        .detected_objects
        .iter()
        .map(|o| o.name().unwrap_or("unknown"))
        .collect();

    match names.as_slice() {
        [] => None,
        [only] => Some(format!("The system identified a {} in the scene.", only)),
        [rest @ .., last] => Some(format!(
            "The system identified multiple objects: {} and {}.",
            rest.join(", "),
            last
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::event::{DetectedObject, EventType};
    use crate::reasoning::extractor::FeatureExtractor;
    use crate::reasoning::license::Vocabulary;
    use crate::reasoning::patterns::PatternMatcher;
    use chrono::{FixedOffset, TimeZone};

    fn event_at(hour: u32) -> Event {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, hour, 30, 0)
            .unwrap();
        Event::new("evt", EventType::ObjectDetection).with_timestamp(ts)
    }

    fn run(synth: &ExplanationSynthesizer, event: &Event) -> (String, String) {
        let features = FeatureExtractor::new().extract(event);
        let steps = PatternMatcher::new().process(&features);
        synth.synthesize(event, &features, &steps)
    }

    #[test]
    fn test_meaning_thresholds() {
        assert_eq!(meaning_for(0.8), "Significant event requiring attention");
        assert_eq!(meaning_for(0.7), "Notable activity with moderate importance");
        assert_eq!(meaning_for(0.5), "Notable activity with moderate importance");
        assert_eq!(meaning_for(0.4), "Routine activity with standard patterns");
        assert_eq!(meaning_for(0.0), "Routine activity with standard patterns");
    }

    #[test]
    fn test_no_steps_gives_basic_meaning() {
        let event = event_at(10);
        let (meaning, _) = ExplanationSynthesizer::default().synthesize(&event, &[], &[]);
        assert_eq!(meaning, BASIC_MEANING);
    }

    #[test]
    fn test_missing_time_feature_fallback() {
        let event = event_at(10);
        let (_, explanation) = ExplanationSynthesizer::default().synthesize(&event, &[], &[]);
        assert_eq!(explanation, "An event was detected at an unspecified time.");
    }

    #[test]
    fn test_single_object_explanation() {
        let event = event_at(23).with_object(DetectedObject::new("person", 0.92));
        let (meaning, explanation) = run(&ExplanationSynthesizer::default(), &event);

        assert_eq!(meaning, "Significant event requiring attention");
        assert_eq!(
            explanation,
            "An event was detected Event occurred during night hours, indicating unusual or \
             security-relevant activity. The system identified a person in the scene. This \
             suggests presence of person suggests social presence; presence of person suggests \
             human activity. The analysis indicates this represents potential security-relevant \
             event."
        );
    }

    #[test]
    fn test_multiple_objects_sentence() {
        let event = event_at(14)
            .with_object(DetectedObject::new("person", 0.9))
            .with_object(DetectedObject::new("car", 0.8))
            .with_object(DetectedObject::new("dog", 0.7));
        let (_, explanation) = run(&ExplanationSynthesizer::default(), &event);

        assert!(explanation.contains("The system identified multiple objects: person, car and dog."));
    }

    #[test]
    fn test_symbol_descriptions_capped_at_three() {
        let event = event_at(14)
            .with_object(DetectedObject::new("car", 0.9))
            .with_object(DetectedObject::new("phone", 0.9));
        let (_, explanation) = run(&ExplanationSynthesizer::default(), &event);

        assert!(explanation.contains("suggests modern life."));
        assert!(!explanation.contains("suggests communication"));
    }

    #[test]
    fn test_no_pattern_sentence_without_matches() {
        let event = event_at(14).with_object(DetectedObject::new("bird", 0.9));
        let (meaning, explanation) = run(&ExplanationSynthesizer::default(), &event);

        assert_eq!(meaning, "Routine activity with standard patterns");
        assert!(!explanation.contains("The analysis indicates"));
    }

    #[test]
    fn test_primary_pattern_prefers_first_on_tie() {
        let patterns = vec![
            MatchedPattern {
                name: "first".into(),
                match_score: 1.0,
                meaning: "a".into(),
                significance: 0.1,
            },
            MatchedPattern {
                name: "second".into(),
                match_score: 1.0,
                meaning: "b".into(),
                significance: 0.9,
            },
        ];
        assert_eq!(primary_pattern(&patterns).unwrap().name, "first");
    }

    #[test]
    fn test_vocabulary_applied() {
        let license = LicenseConfig::new("Brand", "key")
            .with_vocabulary(Vocabulary::new().with("person", "individual"));
        let synth = ExplanationSynthesizer::new(Some(license));

        let event = event_at(9).with_object(DetectedObject::new("person", 0.9));
        let (_, explanation) = run(&synth, &event);

        assert!(explanation.contains("individual"));
        assert!(!explanation.contains("person"));
    }

    #[test]
    fn test_style_defaults_to_professional() {
        assert_eq!(
            ExplanationSynthesizer::default().style(),
            &ExplanationStyle::Professional
        );
        let casual = LicenseConfig::new("b", "k").with_style(ExplanationStyle::Casual);
        assert_eq!(
            ExplanationSynthesizer::new(Some(casual)).style(),
            &ExplanationStyle::Casual
        );
    }
}
