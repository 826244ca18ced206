//! # Events
//!
//! The unit of work for the reasoning pipeline: one structured report from a
//! detection or sensor source.
//!
//! Events are validated structurally by the host before they reach the
//! engine. Inside the engine every optional field degrades to a default
//! rather than failing.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of detection that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ObjectDetection,
    MotionDetection,
    FacialRecognition,
    AnomalyDetection,
    Custom,
}

impl EventType {
    /// Returns the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ObjectDetection => "object_detection",
            EventType::MotionDetection => "motion_detection",
            EventType::FacialRecognition => "facial_recognition",
            EventType::AnomalyDetection => "anomaly_detection",
            EventType::Custom => "custom",
        }
    }
}

/// One detected-object record.
///
/// Detectors attach arbitrary extra fields (bounding boxes, tracking ids),
/// so the record is kept as a raw JSON object and the two fields the engine
/// reads are exposed through tolerant accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectedObject(Map<String, Value>);

impl DetectedObject {
    /// Create a record with a name and a detection confidence
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        fields.insert("confidence".to_string(), Value::from(confidence));
        Self(fields)
    }

    /// Create a record from raw detector fields
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Attach an extra detector field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Object category name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Detection confidence in [0.0, 1.0].
    ///
    /// Missing, non-numeric or non-finite values read as 0.0.
    pub fn confidence(&self) -> f64 {
        self.0
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Raw detector fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Geographic position of the sensor.
///
/// Producers send coordinate maps under varying key names, so the raw map
/// is kept and the coordinates are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(Map<String, Value>);

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("lat".to_string(), Value::from(lat));
        fields.insert("lng".to_string(), Value::from(lng));
        Self(fields)
    }

    /// Create a location from raw coordinate fields
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn lat(&self) -> Option<f64> {
        self.coordinate(&["lat", "latitude"])
    }

    pub fn lng(&self) -> Option<f64> {
        self.coordinate(&["lng", "lon", "long", "longitude"])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn coordinate(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|k| self.0.get(*k).and_then(Value::as_f64))
    }
}

/// Input event from hardware or an object-detection system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-supplied opaque identifier
    pub event_id: String,

    pub event_type: EventType,

    /// When the event occurred (defaults to processing time)
    #[serde(default = "processing_time", with = "timestamp")]
    pub timestamp: DateTime<FixedOffset>,

    /// Detected objects in arrival order
    #[serde(default)]
    pub detected_objects: Vec<DetectedObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_metadata: Option<Map<String, Value>>,

    #[serde(default)]
    pub sensor_data: Map<String, Value>,

    /// Absent, `null` and `{}` all mean no location
    #[serde(
        default,
        deserialize_with = "non_empty_location",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Location>,

    #[serde(default)]
    pub context: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_config: Option<Map<String, Value>>,
}

impl Event {
    /// Create an event stamped with the current local time
    pub fn new(event_id: impl Into<String>, event_type: EventType) -> Self {
        Self {
            event_id: event_id.into(),
            event_type,
            timestamp: processing_time(),
            detected_objects: Vec::new(),
            image_metadata: None,
            sensor_data: Map::new(),
            location: None,
            context: Map::new(),
            brand_config: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_object(mut self, object: DetectedObject) -> Self {
        self.detected_objects.push(object);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_sensor(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sensor_data.insert(key.into(), value.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Hour of day in the timestamp's own offset
    pub fn local_hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

fn processing_time() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn non_empty_location<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Location>, D::Error> {
    let raw = Option::<Location>::deserialize(d)?;
    Ok(raw.filter(|loc| !loc.is_empty()))
}

/// Epoch values above this magnitude are milliseconds, not seconds
const EPOCH_MILLIS_WATERSHED: f64 = 2e10;

/// Parse an event timestamp.
///
/// Accepts RFC 3339 (with offset), or a naive datetime with either a `T` or
/// a space between date and time. Naive values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .or_else(|_| {
            raw.parse::<NaiveDateTime>()
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

/// Convert Unix epoch time to a UTC timestamp.
///
/// Magnitudes above 2e10 are read as milliseconds. Returns `None` for
/// non-finite or out-of-range values.
pub fn epoch_timestamp(value: f64) -> Option<DateTime<FixedOffset>> {
    if !value.is_finite() {
        return None;
    }
    let seconds = if value.abs() > EPOCH_MILLIS_WATERSHED {
        value / 1000.0
    } else {
        value
    };
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos).map(|ts| ts.fixed_offset())
}

mod timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Epoch(f64),
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<FixedOffset>, D::Error> {
        match RawTimestamp::deserialize(d)? {
            RawTimestamp::Text(raw) => super::parse_timestamp(&raw)
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e))),
            RawTimestamp::Epoch(value) => super::epoch_timestamp(value)
                .ok_or_else(|| de::Error::custom(format!("epoch timestamp out of range: {}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_event_uses_defaults() {
        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-1",
            "event_type": "motion_detection"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::MotionDetection);
        assert!(event.detected_objects.is_empty());
        assert!(event.location.is_none());
        assert!(event.sensor_data.is_empty());
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let ts = parse_timestamp("2024-03-01T23:30:00").unwrap();
        assert_eq!(ts.hour(), 23);
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_timestamp_keeps_local_hour() {
        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-2",
            "event_type": "object_detection",
            "timestamp": "2024-03-01T09:15:00+05:30"
        }))
        .unwrap();
        assert_eq!(event.local_hour(), 9);
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let result: Result<Event, _> = serde_json::from_value(json!({
            "event_id": "evt-3",
            "event_type": "custom",
            "timestamp": "yesterday at noon"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let result: Result<Event, _> = serde_json::from_value(json!({
            "event_id": "evt-4",
            "event_type": "thermal"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_detected_object_tolerates_bad_fields() {
        let obj: DetectedObject = serde_json::from_value(json!({
            "name": 42,
            "confidence": "high",
            "bbox": [1, 2, 3, 4]
        }))
        .unwrap();

        assert_eq!(obj.name(), None);
        assert_eq!(obj.confidence(), 0.0);
        assert!(obj.fields().contains_key("bbox"));
    }

    #[test]
    fn test_detected_object_confidence_clamped() {
        assert_eq!(DetectedObject::new("person", 1.7).confidence(), 1.0);
        assert_eq!(DetectedObject::new("person", -0.2).confidence(), 0.0);
    }

    #[test]
    fn test_location_aliases() {
        let loc: Location = serde_json::from_value(json!({"latitude": 37.77, "lon": -122.41})).unwrap();
        assert_eq!(loc.lat(), Some(37.77));
        assert_eq!(loc.lng(), Some(-122.41));
    }

    #[test]
    fn test_empty_location_is_absent() {
        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-5",
            "event_type": "object_detection",
            "location": {}
        }))
        .unwrap();
        assert!(event.location.is_none());

        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-6",
            "event_type": "object_detection",
            "location": null
        }))
        .unwrap();
        assert!(event.location.is_none());
    }

    #[test]
    fn test_partial_location_accepted() {
        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-7",
            "event_type": "object_detection",
            "location": {"lat": 1.0}
        }))
        .unwrap();

        let location = event.location.unwrap();
        assert_eq!(location.lat(), Some(1.0));
        assert_eq!(location.lng(), None);
    }

    #[test]
    fn test_space_separated_timestamp() {
        let ts = parse_timestamp("2024-01-15 23:00:00").unwrap();
        assert_eq!(ts.hour(), 23);
        assert_eq!(ts.offset().local_minus_utc(), 0);

        let ts = parse_timestamp("2024-01-15 23:00:00.250000").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);

        let ts = parse_timestamp("2024-01-15 07:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 7);
        assert_eq!(ts.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_epoch_timestamps() {
        // 2024-01-15T23:00:00Z
        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-8",
            "event_type": "object_detection",
            "timestamp": 1705359600
        }))
        .unwrap();
        assert_eq!(event.local_hour(), 23);
        assert_eq!(event.timestamp.offset().local_minus_utc(), 0);

        let event: Event = serde_json::from_value(json!({
            "event_id": "evt-9",
            "event_type": "object_detection",
            "timestamp": 1705359600.5
        }))
        .unwrap();
        assert_eq!(event.timestamp.timestamp(), 1705359600);
        assert_eq!(event.timestamp.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_epoch_milliseconds() {
        let ts = epoch_timestamp(1_705_359_600_000.0).unwrap();
        assert_eq!(ts.timestamp(), 1_705_359_600);
        assert!(epoch_timestamp(f64::NAN).is_none());
    }
}
