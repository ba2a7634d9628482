use serde::{Deserialize, Serialize};

use crate::{
    error::{BoundaryError, BoundaryResult, Issue, IssueKind},
    geom::{self, GeometryMetrics},
    types::{AreaUnit, GeoPoint},
};

/// Accepted ranges for boundary measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeometryLimits {
    /// Smallest accepted area, square feet. Default 50.
    pub min_area: f64,
    /// Largest accepted area, square feet. Default 50,000,000.
    pub max_area: f64,
    /// Shortest accepted perimeter, feet. Default 28.
    pub min_perimeter: f64,
    /// Longest accepted perimeter, feet. Default 50,000.
    pub max_perimeter: f64,
    /// Lowest accepted compactness `4π·area / perimeter²`. Default 0.1.
    pub min_compactness: f64,
}

impl Default for GeometryLimits {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            max_area: 50_000_000.0,
            min_perimeter: 28.0,
            max_perimeter: 50_000.0,
            min_compactness: 0.1,
        }
    }
}

impl GeometryLimits {
    pub fn check(&self) -> BoundaryResult<()> {
        if !(self.min_area >= 0.0 && self.min_area <= self.max_area) {
            return Err(BoundaryError::invalid_option("minArea", "must be non-negative and not above maxArea"));
        }
        if !(self.min_perimeter >= 0.0 && self.min_perimeter <= self.max_perimeter) {
            return Err(BoundaryError::invalid_option("minPerimeter", "must be non-negative and not above maxPerimeter"));
        }
        if !(0.0..=1.0).contains(&self.min_compactness) {
            return Err(BoundaryError::invalid_option("minCompactness", "must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Outcome of checking a boundary's measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryValidation {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub metrics: GeometryMetrics,
}

/// Check area, perimeter and shape regularity of a ring.
///
/// `area` (square feet) and `perimeter` (feet) are caller hints, typically
/// from the drawing tool; missing or non-finite hints are measured from
/// `points`. Only an out-of-range area is an error.
pub fn validate_geometry(
    points: &[GeoPoint],
    area: Option<f64>,
    perimeter: Option<f64>,
    limits: &GeometryLimits,
) -> GeometryValidation {
    let area = area.filter(|a| a.is_finite())
        .unwrap_or_else(|| geom::polygon_area(points, AreaUnit::SquareFeet));
    let perimeter = perimeter.filter(|p| p.is_finite())
        .unwrap_or_else(|| geom::polygon_perimeter(points));
    let metrics = GeometryMetrics::from_parts(area, perimeter);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if area < limits.min_area || area > limits.max_area {
        errors.push(Issue::new(
            IssueKind::InvalidArea,
            format!("Area of {area:.1} sq ft is outside the accepted range {}-{} sq ft", limits.min_area, limits.max_area),
        ));
    }
    if perimeter < limits.min_perimeter || perimeter > limits.max_perimeter {
        warnings.push(Issue::new(
            IssueKind::InvalidPerimeter,
            format!("Perimeter of {perimeter:.1} ft is outside the expected range {}-{} ft", limits.min_perimeter, limits.max_perimeter),
        ));
    }
    if area > 0.0 && metrics.compactness() < limits.min_compactness {
        warnings.push(Issue::new(
            IssueKind::ExcessiveComplexity,
            format!("Boundary shape is highly irregular (complexity {:.2})", metrics.complexity),
        ));
    }

    GeometryValidation { is_valid: errors.is_empty(), errors, warnings, metrics }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Axis-aligned rectangle near the equator, `w` by `h` degrees.
    fn rect(w: f64, h: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, w),
            GeoPoint::new(h, w),
            GeoPoint::new(h, 0.0),
            GeoPoint::new(0.0, 0.0),
        ]
    }

    #[test]
    fn driveway_sized_square_passes() {
        // ~36 ft square
        let result = validate_geometry(&rect(0.0001, 0.0001), None, None, &GeometryLimits::default());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert!((result.metrics.area - 1333.9).abs() < 1.0);
    }

    #[test]
    fn tiny_area_is_an_error() {
        let result = validate_geometry(&rect(0.0001, 0.0001), Some(10.0), Some(40.0), &GeometryLimits::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].kind, IssueKind::InvalidArea);
    }

    #[test]
    fn long_perimeter_is_a_warning() {
        let result = validate_geometry(&[], Some(1_000_000.0), Some(60_000.0), &GeometryLimits::default());
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.kind == IssueKind::InvalidPerimeter));
    }

    #[test]
    fn sliver_is_flagged_as_complex() {
        // 0.01 x 0.00005 degrees: about 3650 ft by 18 ft
        let result = validate_geometry(&rect(0.01, 0.00005), None, None, &GeometryLimits::default());
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.kind == IssueKind::ExcessiveComplexity));
        assert!(result.metrics.complexity > 10.0);
    }

    #[test]
    fn non_finite_hints_are_measured() {
        let result = validate_geometry(&rect(0.0001, 0.0001), Some(f64::NAN), None, &GeometryLimits::default());
        assert!(result.metrics.area > 1000.0);
    }

    #[test]
    fn limits_check() {
        assert!(GeometryLimits::default().check().is_ok());
        let limits = GeometryLimits { min_area: 10.0, max_area: 1.0, ..Default::default() };
        assert!(limits.check().is_err());
    }
}
