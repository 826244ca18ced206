//! # Feature Extraction
//!
//! Maps raw detections, time and location to symbolic features.
//!
//! Output order is fixed:
//! 1. Object features, in object arrival order
//! 2. Exactly one `time_of_day` feature
//! 3. At most one `location_tracked` feature
//!
//! Extraction never fails. Unknown categories contribute nothing.

use super::event::Event;
use super::feature::SymbolicFeature;

/// Feature name of the temporal bucket
pub const TIME_OF_DAY_FEATURE: &str = "time_of_day";

/// Feature name emitted when the event carries a location
pub const LOCATION_FEATURE: &str = "location_tracked";

/// Discount applied to detection confidence for symbolic interpretation
pub const SYMBOLIC_DISCOUNT: f64 = 0.8;

/// Object category → symbolic attributes
const OBJECT_SYMBOLISM: &[(&str, &[&str])] = &[
    ("person", &["social_presence", "human_activity"]),
    ("car", &["transportation", "mobility", "modern_life"]),
    ("dog", &["companionship", "loyalty", "domestic_life"]),
    ("cat", &["independence", "comfort", "domestic_life"]),
    ("bird", &["freedom", "nature", "vitality"]),
    ("bicycle", &["health", "exercise", "eco_friendly"]),
    ("book", &["knowledge", "learning", "intellectual_activity"]),
    ("phone", &["communication", "connectivity", "modern_life"]),
];

/// Symbolic attributes of an object category (expects a lower-cased name)
pub fn symbolism_for(category: &str) -> Option<&'static [&'static str]> {
    OBJECT_SYMBOLISM
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, attributes)| *attributes)
}

/// Time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket an hour of day: [6,12) morning, [12,18) afternoon,
    /// [18,22) evening, everything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => {
                "Event occurred during morning hours, suggesting daily routine activities"
            }
            TimeOfDay::Afternoon => {
                "Event occurred during afternoon, indicating active daytime period"
            }
            TimeOfDay::Evening => {
                "Event occurred during evening, suggesting end-of-day activities"
            }
            TimeOfDay::Night => {
                "Event occurred during night hours, indicating unusual or security-relevant activity"
            }
        }
    }
}

/// Extracts symbolic features from events.
///
/// Stateless; the symbolism table is compile-time data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the ordered feature list for an event
    pub fn extract(&self, event: &Event) -> Vec<SymbolicFeature> {
        let mut features = Vec::new();

        for object in &event.detected_objects {
            let category = object.name().unwrap_or("").to_lowercase();
            let Some(attributes) = symbolism_for(&category) else {
                continue;
            };

            let confidence = object.confidence() * SYMBOLIC_DISCOUNT;
            for attribute in attributes {
                features.push(SymbolicFeature::flag(
                    *attribute,
                    confidence,
                    format!(
                        "Presence of {} suggests {}",
                        category,
                        attribute.replace('_', " ")
                    ),
                ));
            }
        }

        let bucket = TimeOfDay::from_hour(event.local_hour());
        features.push(SymbolicFeature::text(
            TIME_OF_DAY_FEATURE,
            bucket.as_str(),
            1.0,
            bucket.description(),
        ));

        if event.location.as_ref().map_or(false, |loc| !loc.is_empty()) {
            features.push(SymbolicFeature::flag(
                LOCATION_FEATURE,
                1.0,
                "Event has location information, enabling spatial context analysis",
            ));
        }

        features
    }
}
