use std::fmt;

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// A geographic point in decimal degrees.
///
/// Deserialization is lenient: missing, `null` or non-numeric values become
/// NaN and numeric strings are parsed, so that malformed drawing-tool output
/// reaches the validator (which drops and reports it) instead of failing the
/// whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "latitude", deserialize_with = "lenient_f64", default = "nan")]
    pub lat: f64,
    #[serde(alias = "lon", alias = "longitude", deserialize_with = "lenient_f64", default = "nan")]
    pub lng: f64,
}

impl GeoPoint {
    #[inline] pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Both components are finite numbers.
    #[inline] pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }

    /// Both components differ by less than `tolerance` degrees.
    #[inline]
    pub fn approx_eq(&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance && (self.lng - other.lng).abs() < tolerance
    }

    /// Round both components to `decimals` decimal places.
    pub fn rounded(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        Self {
            lat: (self.lat * scale).round() / scale,
            lng: (self.lng * scale).round() / scale,
        }
    }

    /// Planar coordinate with x = lng, y = lat.
    #[inline] pub fn to_coord(&self) -> Coord<f64> { Coord { x: self.lng, y: self.lat } }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self { p.to_coord() }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(c: Coord<f64>) -> Self { Self { lat: c.y, lng: c.x } }
}

impl From<(f64, f64)> for GeoPoint {
    /// `(lat, lng)` tuple.
    fn from((lat, lng): (f64, f64)) -> Self { Self { lat, lng } }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

fn nan() -> f64 { f64::NAN }

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(value) => value,
        LenientNumber::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        LenientNumber::Other(_) => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 37.5, "lng": "-122.25"}"#).unwrap();
        assert_eq!(p, GeoPoint::new(37.5, -122.25));
    }

    #[test]
    fn malformed_components_become_nan() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": null, "lng": "east"}"#).unwrap();
        assert!(p.lat.is_nan() && p.lng.is_nan());
        assert!(!p.is_finite());

        let p: GeoPoint = serde_json::from_str(r#"{"lng": 4.0}"#).unwrap();
        assert!(p.lat.is_nan());
        assert_eq!(p.lng, 4.0);
    }

    #[test]
    fn accepts_long_field_names() {
        let p: GeoPoint = serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();
        assert_eq!(p, GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn rounding_and_tolerance() {
        let p = GeoPoint::new(37.123_456_789, -122.987_654_321).rounded(6);
        assert_eq!(p, GeoPoint::new(37.123457, -122.987654));
        assert!(p.approx_eq(&GeoPoint::new(37.1234575, -122.9876545), 1e-6));
        assert!(!p.approx_eq(&GeoPoint::new(37.123459, -122.987654), 1e-6));
    }

    #[test]
    fn coord_uses_lng_as_x() {
        let c = GeoPoint::new(10.0, 20.0).to_coord();
        assert_eq!((c.x, c.y), (20.0, 10.0));
        assert_eq!(GeoPoint::from(c), GeoPoint::new(10.0, 20.0));
    }
}
