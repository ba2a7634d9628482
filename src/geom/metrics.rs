use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::types::{AreaUnit, GeoPoint};
use super::kernel::{polygon_area, polygon_perimeter};

/// Derived measurements of a boundary ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryMetrics {
    /// Area in square feet.
    pub area: f64,
    /// Perimeter in feet.
    pub perimeter: f64,
    /// `perimeter² / (4π·area)`: 1 for a circle, larger for irregular shapes.
    pub complexity: f64,
}

impl GeometryMetrics {
    /// Measure a ring in square feet / feet.
    pub fn of(points: &[GeoPoint]) -> Self {
        Self::from_parts(polygon_area(points, AreaUnit::SquareFeet), polygon_perimeter(points))
    }

    pub fn from_parts(area: f64, perimeter: f64) -> Self {
        Self { area, perimeter, complexity: complexity(area, perimeter) }
    }

    /// Polsby-Popper compactness, the reciprocal of `complexity` (0 when degenerate).
    pub fn compactness(&self) -> f64 {
        if self.complexity.is_finite() && self.complexity > 0.0 { 1.0 / self.complexity } else { 0.0 }
    }
}

/// Isoperimetric complexity `perimeter² / (4π·area)`; infinite for zero area.
pub fn complexity(area: f64, perimeter: f64) -> f64 {
    if area <= 0.0 { return f64::INFINITY }
    perimeter * perimeter / (4.0 * PI * area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_like_polygon_has_unit_complexity() {
        let ring: Vec<GeoPoint> = (0..360)
            .map(|i| {
                let theta = (i as f64).to_radians();
                GeoPoint::new(0.001 * theta.sin(), 0.001 * theta.cos())
            })
            .collect();
        let metrics = GeometryMetrics::of(&ring);
        assert!((metrics.complexity - 1.0).abs() < 0.01, "complexity {}", metrics.complexity);
        assert!((metrics.compactness() - 1.0).abs() < 0.01);
    }

    #[test]
    fn zero_area_is_infinitely_complex() {
        assert!(complexity(0.0, 10.0).is_infinite());
        assert_eq!(GeometryMetrics::from_parts(0.0, 10.0).compactness(), 0.0);
    }

    #[test]
    fn square_complexity() {
        // side 10: 40² / (4π·100) = 4/π
        assert!((complexity(100.0, 40.0) - 4.0 / PI).abs() < 1e-12);
    }
}
