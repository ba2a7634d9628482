use geo::{BoundingRect, Coord, LineString, Rect};
use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// An inclusive latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// The whole globe.
    pub const GLOBAL: BBox = BBox { min_lat: -90.0, max_lat: 90.0, min_lng: -180.0, max_lng: 180.0 };

    /// The contiguous United States.
    pub const CONTINENTAL_US: BBox = BBox { min_lat: 24.0, max_lat: 50.0, min_lng: -125.0, max_lng: -66.0 };

    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self { min_lat, max_lat, min_lng, max_lng }
    }

    /// Check the point is finite and lies inside the box (edges included).
    #[inline]
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.is_finite()
            && p.lat >= self.min_lat && p.lat <= self.max_lat
            && p.lng >= self.min_lng && p.lng <= self.max_lng
    }

    /// Corners are finite and ordered.
    pub fn is_well_formed(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lng, self.max_lng].iter().all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
    }

    /// Smallest box covering all finite points, or `None` if there are none.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let line = points.iter()
            .filter(|p| p.is_finite())
            .map(GeoPoint::to_coord)
            .collect::<LineString<f64>>();
        line.bounding_rect().map(Self::from)
    }

    #[inline] pub fn width(&self) -> f64 { self.max_lng - self.min_lng }

    #[inline] pub fn height(&self) -> f64 { self.max_lat - self.min_lat }

    /// Planar rectangle with x = lng, y = lat.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.min_lng, y: self.min_lat },
            Coord { x: self.max_lng, y: self.max_lat },
        )
    }
}

impl Default for BBox {
    fn default() -> Self { Self::GLOBAL }
}

impl From<Rect<f64>> for BBox {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_contains_edges_and_rejects_nan() {
        assert!(BBox::GLOBAL.contains(&GeoPoint::new(90.0, -180.0)));
        assert!(!BBox::GLOBAL.contains(&GeoPoint::new(95.0, 0.0)));
        assert!(!BBox::GLOBAL.contains(&GeoPoint::new(f64::NAN, 0.0)));
        assert!(!BBox::GLOBAL.contains(&GeoPoint::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn continental_us_excludes_europe() {
        assert!(BBox::CONTINENTAL_US.contains(&GeoPoint::new(39.74, -104.99)));
        assert!(!BBox::CONTINENTAL_US.contains(&GeoPoint::new(48.85, 2.35)));
    }

    #[test]
    fn from_points_skips_invalid() {
        let bbox = BBox::from_points(&[
            GeoPoint::new(1.0, 5.0),
            GeoPoint::new(f64::NAN, 100.0),
            GeoPoint::new(-2.0, 7.0),
        ]).unwrap();
        assert_eq!(bbox, BBox::new(-2.0, 1.0, 5.0, 7.0));
        assert_eq!((bbox.width(), bbox.height()), (2.0, 3.0));
        assert!(BBox::from_points(&[]).is_none());
    }

    #[test]
    fn rect_round_trip() {
        let bbox = BBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(BBox::from(bbox.to_rect()), bbox);
        assert!(bbox.is_well_formed());
        assert!(!BBox::new(2.0, 1.0, 3.0, 4.0).is_well_formed());
    }
}
