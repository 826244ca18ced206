//! Symbolic features derived from raw detections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value carried by a symbolic feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Text(String),
}

impl FeatureValue {
    /// String payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            FeatureValue::Flag(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Flag(b) => write!(f, "{}", b),
            FeatureValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A human-interpretable attribute inferred from an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicFeature {
    /// Feature key (not unique within one event)
    pub feature_name: String,
    pub feature_value: FeatureValue,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    pub human_description: String,
}

impl SymbolicFeature {
    /// Create a boolean feature
    pub fn flag(name: impl Into<String>, confidence: f64, description: impl Into<String>) -> Self {
        Self {
            feature_name: name.into(),
            feature_value: FeatureValue::Flag(true),
            confidence,
            human_description: description.into(),
        }
    }

    /// Create a text-valued feature
    pub fn text(
        name: impl Into<String>,
        value: impl Into<String>,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            feature_name: name.into(),
            feature_value: FeatureValue::Text(value.into()),
            confidence,
            human_description: description.into(),
        }
    }
}
