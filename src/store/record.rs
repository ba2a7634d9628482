use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    error::Issue,
    geom::GeometryMetrics,
    simplify::CompressionResult,
    types::{GeoPoint, MeasurementUnits},
    validate::ValidationMetadata,
};

/// Boundary as produced by a drawing tool, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoundaryInput {
    pub coordinates: Vec<GeoPoint>,
    /// Area hint in square feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Perimeter hint in feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perimeter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagery: Option<ImageryInput>,
}

impl RawBoundaryInput {
    pub fn new(coordinates: Vec<GeoPoint>) -> Self {
        Self { coordinates, ..Default::default() }
    }

    pub fn with_imagery(mut self, imagery: ImageryInput) -> Self {
        self.imagery = Some(imagery);
        self
    }
}

/// Map imagery a boundary was traced on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageryType {
    Satellite,
    Hybrid,
    Aerial,
    Roadmap,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ImageryType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageryType::Satellite => "satellite",
            ImageryType::Hybrid => "hybrid",
            ImageryType::Aerial => "aerial",
            ImageryType::Roadmap => "roadmap",
            ImageryType::Unknown => "unknown",
        }
    }

    /// Static description of the imagery type: source, quality, resolution, accuracy.
    fn defaults(self) -> [&'static str; 4] {
        match self {
            ImageryType::Satellite => ["Satellite imagery", "high", "0.5m", "±1m"],
            ImageryType::Hybrid => ["Satellite imagery with map labels", "high", "0.5m", "±1m"],
            ImageryType::Aerial => ["Aerial photography", "very high", "0.15m", "±0.5m"],
            ImageryType::Roadmap => ["Vector road map", "medium", "n/a", "±5m"],
            ImageryType::Unknown => ["unknown", "unknown", "unknown", "unknown"],
        }
    }
}

impl From<&str> for ImageryType {
    /// Case-insensitive; unrecognized names map to `Unknown`.
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "satellite" => ImageryType::Satellite,
            "hybrid" => ImageryType::Hybrid,
            "aerial" => ImageryType::Aerial,
            "roadmap" => ImageryType::Roadmap,
            _ => ImageryType::Unknown,
        }
    }
}

impl fmt::Display for ImageryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Imagery fields supplied by the caller; absent fields take per-type defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageryInput {
    #[serde(rename = "type")]
    pub kind: Option<ImageryType>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub quality: Option<String>,
    pub resolution: Option<String>,
    pub accuracy: Option<String>,
}

/// Where the imagery under a boundary came from. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageryMetadata {
    #[serde(rename = "type")]
    pub kind: ImageryType,
    pub source: String,
    pub date: String,
    pub quality: String,
    pub resolution: String,
    pub accuracy: String,
}

impl ImageryMetadata {
    pub fn from_input(input: Option<&ImageryInput>) -> Self {
        let input = input.cloned().unwrap_or_default();
        let kind = input.kind.unwrap_or_default();
        let [source, quality, resolution, accuracy] = kind.defaults();

        Self {
            kind,
            source: input.source.unwrap_or_else(|| source.to_string()),
            date: input.date.unwrap_or_else(|| "unknown".to_string()),
            quality: input.quality.unwrap_or_else(|| quality.to_string()),
            resolution: input.resolution.unwrap_or_else(|| resolution.to_string()),
            accuracy: input.accuracy.unwrap_or_else(|| accuracy.to_string()),
        }
    }
}

impl Default for ImageryMetadata {
    fn default() -> Self { Self::from_input(None) }
}

/// Rendered preview of a boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailData {
    pub svg: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// The measured boundary itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryData {
    pub coordinates: Vec<GeoPoint>,
    pub area: f64,
    pub perimeter: f64,
    #[serde(default)]
    pub units: MeasurementUnits,
}

/// Validation outcome as persisted with a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordValidation {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub metadata: ValidationMetadata,
    pub quality_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryMetrics>,
}

/// The unit of storage: one validated boundary and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRecord {
    pub boundary: BoundaryData,
    #[serde(default)]
    pub validation: Option<RecordValidation>,
    #[serde(default)]
    pub compression: Option<CompressionResult>,
    #[serde(default)]
    pub thumbnail: Option<ThumbnailData>,
    #[serde(default)]
    pub imagery: ImageryMetadata,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub tool_type: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl BoundaryRecord {
    #[inline] pub fn coordinates(&self) -> &[GeoPoint] { &self.boundary.coordinates }

    #[inline] pub fn quality_score(&self) -> Option<u8> { self.validation.as_ref().map(|v| v.quality_score) }

    /// RFC 3339 timestamp with millisecond precision.
    pub fn timestamp_string(&self) -> String {
        timestamp::format(&self.timestamp)
    }
}

/// Hex SHA-256 of a coordinate ring, independent of when it was stored.
pub fn fingerprint(points: &[GeoPoint]) -> String {
    let mut hasher = Sha256::new();
    for p in points {
        hasher.update(p.lat.to_le_bytes());
        hasher.update(p.lng.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// `DateTime<Utc>` as an RFC 3339 string with milliseconds and a `Z` suffix.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn format(t: &DateTime<Utc>) -> String {
        t.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

/// Current time truncated to whole milliseconds, so it survives a round
/// trip through [`timestamp`] unchanged.
pub(crate) fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imagery_defaults_fill_missing_fields() {
        let input = ImageryInput {
            kind: Some(ImageryType::Aerial),
            date: Some("2024-05-01".into()),
            ..Default::default()
        };
        let meta = ImageryMetadata::from_input(Some(&input));
        assert_eq!(meta.kind, ImageryType::Aerial);
        assert_eq!(meta.date, "2024-05-01");
        assert_eq!(meta.quality, "very high");
        assert_eq!(meta.source, "Aerial photography");

        let unknown = ImageryMetadata::default();
        assert_eq!(unknown.kind, ImageryType::Unknown);
        assert_eq!(unknown.quality, "unknown");
    }

    #[test]
    fn unrecognized_imagery_type_is_unknown() {
        let input: ImageryInput = serde_json::from_str(r#"{"type": "terrain", "quality": "low"}"#).unwrap();
        assert_eq!(input.kind, Some(ImageryType::Unknown));
        assert_eq!(input.quality.as_deref(), Some("low"));
    }

    #[test]
    fn imagery_type_from_name() {
        assert_eq!(ImageryType::from(" Satellite "), ImageryType::Satellite);
        assert_eq!(ImageryType::from("terrain"), ImageryType::Unknown);
        assert_eq!(ImageryType::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn raw_input_accepts_drawing_tool_json() {
        let raw: RawBoundaryInput = serde_json::from_str(
            r#"{"coordinates": [{"lat": 39.1, "lng": -105.2}, {"latitude": "39.2", "longitude": -105.2}], "area": 1200.5}"#,
        ).unwrap();
        assert_eq!(raw.coordinates.len(), 2);
        assert_eq!(raw.coordinates[1], GeoPoint::new(39.2, -105.2));
        assert_eq!(raw.area, Some(1200.5));
        assert!(raw.imagery.is_none());
    }

    #[test]
    fn fingerprint_depends_only_on_coordinates() {
        let a = [GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)];
        let b = [GeoPoint::new(3.0, 4.0), GeoPoint::new(1.0, 2.0)];
        assert_eq!(fingerprint(&a), fingerprint(&a));
        assert_ne!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&a).len(), 64);
    }

    #[test]
    fn timestamp_has_millisecond_precision() {
        let t = DateTime::parse_from_rfc3339("2024-03-09T17:04:05.123456Z").unwrap().with_timezone(&Utc);
        assert_eq!(timestamp::format(&t), "2024-03-09T17:04:05.123Z");

        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
