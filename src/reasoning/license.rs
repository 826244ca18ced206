//! # License Configuration
//!
//! Per-brand configuration bound to one orchestrator for its lifetime.
//!
//! Only `custom_vocabulary` and `explanation_style` are read by the engine.
//! Quota fields belong to the host and are carried for reporting.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Explanation style label. Stored for display; it does not change the
/// generated text.
///
/// Any non-empty label is accepted. Labels other than the three known
/// styles are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExplanationStyle {
    #[default]
    Professional,
    Casual,
    Technical,
    Custom(String),
}

impl ExplanationStyle {
    pub fn as_str(&self) -> &str {
        match self {
            ExplanationStyle::Professional => "professional",
            ExplanationStyle::Casual => "casual",
            ExplanationStyle::Technical => "technical",
            ExplanationStyle::Custom(label) => label,
        }
    }

    /// Parse a style label. Known styles match case-insensitively; an empty
    /// label is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self::from(label.to_string()))
    }
}

impl From<String> for ExplanationStyle {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "professional" => ExplanationStyle::Professional,
            "casual" => ExplanationStyle::Casual,
            "technical" => ExplanationStyle::Technical,
            _ => ExplanationStyle::Custom(label),
        }
    }
}

impl From<ExplanationStyle> for String {
    fn from(style: ExplanationStyle) -> Self {
        match style {
            ExplanationStyle::Custom(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExplanationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand vocabulary: ordered `original → replacement` pairs.
///
/// Order is the order the pairs were declared (document order when
/// deserialized). Replacements are applied sequentially, each one against
/// the output of the previous, so a later pair can rewrite text introduced
/// by an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    pairs: Vec<(String, String)>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a pair. Updating keeps the original position.
    pub fn insert(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
        let original = original.into();
        let replacement = replacement.into();
        match self.pairs.iter_mut().find(|(o, _)| *o == original) {
            Some(pair) => pair.1 = replacement,
            None => self.pairs.push((original, replacement)),
        }
    }

    pub fn with(mut self, original: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.insert(original, replacement);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, r)| (o.as_str(), r.as_str()))
    }

    /// Apply every pair as a literal, case-sensitive substring replacement.
    ///
    /// Pairs with an empty original are skipped rather than inserting the
    /// replacement between every character.
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .filter(|(original, _)| !original.is_empty())
            .fold(text.to_string(), |acc, (original, replacement)| {
                acc.replace(original.as_str(), replacement)
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for (original, replacement) in iter {
            vocabulary.insert(original, replacement);
        }
        vocabulary
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (original, replacement) in &self.pairs {
            map.serialize_entry(original, replacement)?;
        }
        map.end()
    }
}

struct VocabularyVisitor;

impl<'de> Visitor<'de> for VocabularyVisitor {
    type Value = Vocabulary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string replacements")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Vocabulary, A::Error> {
        let mut vocabulary = Vocabulary::new();
        while let Some((original, replacement)) = access.next_entry::<String, String>()? {
            vocabulary.insert(original, replacement);
        }
        Ok(vocabulary)
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VocabularyVisitor)
    }
}

/// Brand licensing and customization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseConfig {
    pub brand_name: String,

    /// Bearer token checked by the host
    pub license_key: String,

    #[serde(default)]
    pub custom_vocabulary: Vocabulary,

    #[serde(default)]
    pub explanation_style: ExplanationStyle,

    /// Reserved for future filtering
    #[serde(default)]
    pub focus_areas: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_request_limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<u64>,

    #[serde(default)]
    pub enabled_features: Vec<String>,

    #[serde(default)]
    pub custom_models: std::collections::BTreeMap<String, String>,
}

impl LicenseConfig {
    /// Create a license with default customization
    pub fn new(brand_name: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            license_key: license_key.into(),
            custom_vocabulary: Vocabulary::new(),
            explanation_style: ExplanationStyle::default(),
            focus_areas: Vec::new(),
            daily_request_limit: None,
            rate_limit_per_minute: None,
            enabled_features: Vec::new(),
            custom_models: Default::default(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.custom_vocabulary = vocabulary;
        self
    }

    pub fn with_style(mut self, style: ExplanationStyle) -> Self {
        self.explanation_style = style;
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_features = features.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vocabulary_keeps_document_order() {
        let vocab: Vocabulary = serde_json::from_str(
            r#"{"zebra": "z", "apple": "a", "mango": "m"}"#,
        )
        .unwrap();
        let keys: Vec<_> = vocab.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_vocabulary_compounds() {
        let vocab = Vocabulary::new()
            .with("person", "detected_individual")
            .with("detected", "identified");
        assert_eq!(
            vocab.apply("A person was detected."),
            "A identified_individual was identified."
        );
    }

    #[test]
    fn test_vocabulary_is_case_sensitive() {
        let vocab = Vocabulary::new().with("person", "individual");
        assert_eq!(vocab.apply("Person and person"), "Person and individual");
    }

    #[test]
    fn test_vocabulary_insert_updates_in_place() {
        let mut vocab = Vocabulary::new().with("a", "1").with("b", "2");
        vocab.insert("a", "3");
        let pairs: Vec<_> = vocab.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_license_defaults() {
        let license: LicenseConfig = serde_json::from_value(json!({
            "brand_name": "Acme",
            "license_key": "k"
        }))
        .unwrap();

        assert_eq!(license.explanation_style, ExplanationStyle::Professional);
        assert!(license.custom_vocabulary.is_empty());
        assert!(license.daily_request_limit.is_none());
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(ExplanationStyle::parse("Casual"), Some(ExplanationStyle::Casual));
        assert_eq!(
            ExplanationStyle::parse(" poetic "),
            Some(ExplanationStyle::Custom("poetic".to_string()))
        );
        assert_eq!(ExplanationStyle::parse("   "), None);
    }

    #[test]
    fn test_free_form_style_round_trips() {
        let license: LicenseConfig = serde_json::from_value(json!({
            "brand_name": "Acme",
            "license_key": "k",
            "explanation_style": "friendly"
        }))
        .unwrap();
        assert_eq!(
            license.explanation_style,
            ExplanationStyle::Custom("friendly".to_string())
        );

        let value = serde_json::to_value(&license).unwrap();
        assert_eq!(value["explanation_style"], "friendly");
    }

    #[test]
    fn test_empty_vocabulary_key_skipped() {
        let vocab = Vocabulary::new().with("", "x").with("person", "visitor");
        assert_eq!(vocab.apply("a person"), "a visitor");
    }
}
