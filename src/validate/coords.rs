use rstar::{RTree, AABB};

use crate::{
    error::{BoundaryResult, Issue, IssueKind},
    geom::{self, BBox},
    types::GeoPoint,
};
use super::{ValidateOptions, ValidationResult};

/// Validates and repairs raw boundary coordinates.
#[derive(Debug, Clone, Default)]
pub struct CoordinateValidator {
    options: ValidateOptions,
}

impl CoordinateValidator {
    /// Create a validator, rejecting out-of-range options.
    pub fn new(options: ValidateOptions) -> BoundaryResult<Self> {
        options.check()?;
        Ok(Self { options })
    }

    #[inline] pub fn options(&self) -> &ValidateOptions { &self.options }

    /// Validate `raw`; see [`validate_coordinates`].
    #[inline]
    pub fn validate(&self, raw: &[GeoPoint]) -> ValidationResult {
        validate_coordinates(raw, &self.options)
    }
}

/// Validate a raw coordinate sequence and produce a corrected, closed ring.
///
/// Size violations (empty, too few, too many points) reject the input
/// outright. Otherwise invalid points are dropped, near-duplicates removed,
/// the ring closed and every coordinate rounded, each repair leaving a
/// warning. Self-intersections are reported but accepted.
pub fn validate_coordinates(raw: &[GeoPoint], options: &ValidateOptions) -> ValidationResult {
    let result = ValidationResult::new(raw.len(), options.precision);

    if raw.is_empty() {
        return result.reject(IssueKind::InvalidCoordinates, "No coordinates provided");
    }
    if raw.len() < options.min_vertices {
        return result.reject(
            IssueKind::InsufficientVertices,
            format!("A boundary needs at least {} points, got {}", options.min_vertices, raw.len()),
        );
    }
    if raw.len() > options.max_vertices {
        return result.reject(
            IssueKind::ExcessiveVertices,
            format!("A boundary may have at most {} points, got {}", options.max_vertices, raw.len()),
        );
    }

    repair(raw, options, result)
}

fn repair(raw: &[GeoPoint], options: &ValidateOptions, mut result: ValidationResult) -> ValidationResult {
    let bounds = options.region_bounds.unwrap_or(BBox::GLOBAL);

    let mut accepted = Vec::with_capacity(raw.len() + 1);
    for (i, point) in raw.iter().enumerate() {
        if bounds.contains(point) {
            accepted.push(*point);
            continue;
        }
        let reason = if point.is_finite() { "is outside the allowed bounds" } else { "is not a valid number" };
        result.metadata.out_of_bounds_count += 1;
        result.warnings.push(Issue::new(
            IssueKind::InvalidCoordinates,
            format!("Point {i} {point} {reason} and was removed"),
        ));
    }
    if result.metadata.out_of_bounds_count > 0 {
        tracing::warn!(dropped = result.metadata.out_of_bounds_count, "dropped invalid boundary points");
    }

    // A closing copy of the first point is not a duplicate.
    let arrived_closed = geom::is_closed(&accepted, options.closure_tolerance);
    if arrived_closed { accepted.pop(); }

    let unique = dedupe(&accepted, options.duplicate_tolerance);
    let removed = accepted.len() - unique.len();
    if removed > 0 {
        result.metadata.duplicates_removed = removed;
        result.warnings.push(Issue::new(
            IssueKind::DuplicateVertices,
            format!("{removed} duplicate point(s) within {} degrees were removed", options.duplicate_tolerance),
        ));
    }

    if unique.len() < options.min_vertices {
        let kind = if unique.is_empty() { IssueKind::InvalidCoordinates } else { IssueKind::InsufficientVertices };
        return result.reject(
            kind,
            format!("Only {} distinct valid point(s) remain; at least {} are required", unique.len(), options.min_vertices),
        );
    }

    let mut ring = unique;
    ring.push(ring[0]);
    if !arrived_closed {
        result.warnings.push(Issue::new(
            IssueKind::PolygonNotClosed,
            "Polygon was not closed; the first point was appended to close it",
        ));
    }

    let crossings = geom::self_intersections(&ring);
    if !crossings.is_empty() {
        result.warnings.push(Issue::new(
            IssueKind::SelfIntersecting,
            format!("Boundary edges cross each other in {} place(s)", crossings.len()),
        ));
    }

    let ring: Vec<GeoPoint> = ring.iter().map(|p| p.rounded(options.precision)).collect();
    tracing::debug!(
        original = result.metadata.original_count,
        corrected = ring.len(),
        warnings = result.warnings.len(),
        "validated boundary coordinates"
    );

    result.metadata.valid_count = ring.len();
    result.corrected_coordinates = Some(ring);
    result.is_valid = true;
    result
}

/// Keep the first of every group of points closer than `tolerance` on both axes.
fn dedupe(points: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    let mut index: RTree<[f64; 2]> = RTree::new();
    let mut unique = Vec::with_capacity(points.len());

    for point in points {
        let envelope = AABB::from_corners(
            [point.lng - tolerance, point.lat - tolerance],
            [point.lng + tolerance, point.lat + tolerance],
        );
        let duplicate = index.locate_in_envelope_intersecting(&envelope)
            .any(|q| (q[0] - point.lng).abs() < tolerance && (q[1] - point.lat).abs() < tolerance);
        if !duplicate {
            index.insert([point.lng, point.lat]);
            unique.push(*point);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
        raw.iter().copied().map(GeoPoint::from).collect()
    }

    fn square() -> Vec<GeoPoint> {
        pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn empty_input_is_invalid_coordinates() {
        let result = validate_coordinates(&[], &ValidateOptions::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].kind, IssueKind::InvalidCoordinates);
        assert!(result.corrected_coordinates.is_none());
    }

    #[test]
    fn size_limits_reject() {
        let two = pts(&[(1.0, 1.0), (2.0, 2.0)]);
        let result = validate_coordinates(&two, &ValidateOptions::default());
        assert_eq!(result.errors[0].kind, IssueKind::InsufficientVertices);

        let many: Vec<GeoPoint> = (0..1001).map(|i| GeoPoint::new(i as f64 * 0.01, 0.0)).collect();
        let result = validate_coordinates(&many, &ValidateOptions::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].kind, IssueKind::ExcessiveVertices);
    }

    #[test]
    fn open_square_is_closed_with_warning() {
        let result = validate_coordinates(&square(), &ValidateOptions::default());
        assert!(result.is_valid);
        let ring = result.coordinates();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert!(result.has_issue(IssueKind::PolygonNotClosed));
        assert_eq!(result.metadata.valid_count, 5);
        assert_eq!(result.metadata.original_count, 4);
    }

    #[test]
    fn closed_input_is_not_flagged_or_deduped() {
        let mut closed = square();
        closed.push(closed[0]);
        let result = validate_coordinates(&closed, &ValidateOptions::default());
        assert!(result.is_valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.coordinates().len(), 5);
        assert_eq!(result.metadata.duplicates_removed, 0);
    }

    #[test]
    fn out_of_bounds_point_is_dropped() {
        let mut raw = square();
        raw.insert(2, GeoPoint::new(95.0, 0.0));
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.metadata.out_of_bounds_count, 1);
        assert!(result.coordinates().iter().all(|p| p.lat != 95.0));
        assert!(result.warnings.iter().any(|w| w.kind == IssueKind::InvalidCoordinates));
    }

    #[test]
    fn nan_point_is_dropped() {
        let mut raw = square();
        raw.push(GeoPoint::new(f64::NAN, 3.0));
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.metadata.out_of_bounds_count, 1);
        assert!(result.coordinates().iter().all(GeoPoint::is_finite));
    }

    #[test]
    fn region_bounds_filter_points() {
        let raw = pts(&[(39.0, -105.0), (39.0, -104.9), (39.1, -104.9), (48.85, 2.35)]);
        let options = ValidateOptions::default().with_region(BBox::CONTINENTAL_US);
        let result = validate_coordinates(&raw, &options);
        assert!(result.is_valid);
        assert_eq!(result.metadata.out_of_bounds_count, 1);
        assert_eq!(result.coordinates().len(), 4);
    }

    #[test]
    fn near_duplicates_are_removed_once() {
        let raw = pts(&[
            (0.0, 0.0), (0.0, 10.0), (0.0000004, 10.0000004), (10.0, 10.0), (10.0, 0.0), (10.0, 0.0),
        ]);
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.metadata.duplicates_removed, 2);
        assert_eq!(result.warnings.iter().filter(|w| w.kind == IssueKind::DuplicateVertices).count(), 1);
        assert_eq!(result.coordinates().len(), 5);
    }

    #[test]
    fn too_few_distinct_points_is_structural() {
        let raw = pts(&[(1.0, 1.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].kind, IssueKind::InsufficientVertices);

        let raw = pts(&[(95.0, 1.0), (96.0, 1.0), (97.0, 2.0)]);
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].kind, IssueKind::InvalidCoordinates);
        assert_eq!(result.metadata.out_of_bounds_count, 3);
    }

    #[test]
    fn self_intersection_is_only_a_warning() {
        let bowtie = pts(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        let result = validate_coordinates(&bowtie, &ValidateOptions::default());
        assert!(result.is_valid);
        assert!(result.has_issue(IssueKind::SelfIntersecting));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn coordinates_are_rounded() {
        let raw = pts(&[(37.123_456_789, -122.1), (37.2, -122.1), (37.2, -122.000_000_4)]);
        let result = validate_coordinates(&raw, &ValidateOptions::default());
        let ring = result.coordinates();
        assert_eq!(ring[0].lat, 37.123457);
        assert_eq!(ring[2].lng, -122.0);
        assert_eq!(result.metadata.precision, 6);
    }

    #[test]
    fn validator_rejects_bad_options() {
        assert!(CoordinateValidator::new(ValidateOptions { max_vertices: 1, ..Default::default() }).is_err());
        let validator = CoordinateValidator::new(ValidateOptions::default()).unwrap();
        assert!(validator.validate(&square()).is_valid);
    }
}
