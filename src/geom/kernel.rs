//! Stateless polygon measurements on lat/lng rings.
//!
//! None of these functions fail: NaN or infinite input propagates into the
//! result and must be filtered upstream by the validator.

use crate::types::{AreaUnit, GeoPoint, FEET_PER_METER};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Determinant magnitude below which two segments are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Planar (shoelace) area of the ring in the requested unit.
///
/// Works on raw lng/lat with the closing edge implied, so closed and open
/// rings give the same result. Fewer than 3 points yield 0.
pub fn polygon_area(points: &[GeoPoint], unit: AreaUnit) -> f64 {
    if points.len() < 3 { return 0.0 }

    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        sum += a.lng * b.lat - b.lng * a.lat;
    }

    sum.abs() / 2.0 * unit.factor()
}

/// Great-circle distance between two points, in feet.
pub fn haversine_feet(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c * FEET_PER_METER
}

/// Sum of great-circle edge lengths including the closing edge, in feet.
pub fn polygon_perimeter(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 { return 0.0 }

    let open: f64 = points.windows(2).map(|w| haversine_feet(&w[0], &w[1])).sum();
    let (first, last) = (&points[0], &points[points.len() - 1]);
    open + haversine_feet(last, first)
}

/// Planar distance (degrees) from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment, so points beyond an
/// endpoint measure to that endpoint. A degenerate segment measures to `a`.
pub fn point_segment_distance(p: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (dx, dy) = (b.lng - a.lng, b.lat - a.lat);
    let length_sq = dx * dx + dy * dy;

    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.lng - a.lng) * dx + (p.lat - a.lat) * dy) / length_sq).clamp(0.0, 1.0)
    };

    let (cx, cy) = (a.lng + t * dx, a.lat + t * dy);
    ((p.lng - cx).powi(2) + (p.lat - cy).powi(2)).sqrt()
}

/// Parametric intersection test for segments `a1`-`a2` and `b1`-`b2`.
///
/// Parallel (and collinear) segments never intersect.
pub fn segments_intersect(a1: &GeoPoint, a2: &GeoPoint, b1: &GeoPoint, b2: &GeoPoint) -> bool {
    let (rx, ry) = (a2.lng - a1.lng, a2.lat - a1.lat);
    let (sx, sy) = (b2.lng - b1.lng, b2.lat - b1.lat);

    let det = rx * sy - ry * sx;
    if det.abs() < PARALLEL_EPSILON { return false }

    let (qx, qy) = (b1.lng - a1.lng, b1.lat - a1.lat);
    let t = (qx * sy - qy * sx) / det;
    let u = (qx * ry - qy * rx) / det;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// First and last point agree within `tolerance` degrees on both axes.
pub fn is_closed(points: &[GeoPoint], tolerance: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => first.approx_eq(last, tolerance),
        _ => false,
    }
}

/// All pairs `(i, j)` of non-adjacent ring edges that cross, where edge `k`
/// runs from `ring[k]` to `ring[k + 1]`.
///
/// The ring is expected to be closed (last point repeats the first), so the
/// first and last edges count as adjacent.
pub fn self_intersections(ring: &[GeoPoint]) -> Vec<(usize, usize)> {
    if ring.len() < 4 { return Vec::new() }

    let edges = ring.len() - 1;
    let mut hits = Vec::new();
    for i in 0..edges {
        for j in (i + 2)..edges {
            if i == 0 && j == edges - 1 { continue }
            if segments_intersect(&ring[i], &ring[i + 1], &ring[j], &ring[j + 1]) {
                hits.push((i, j));
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
        raw.iter().copied().map(GeoPoint::from).collect()
    }

    #[test]
    fn square_area_in_square_degrees() {
        let square = pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        assert!((polygon_area(&square, AreaUnit::SquareDegrees) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn closed_and_open_rings_have_equal_area() {
        let open = pts(&[(0.0, 0.0), (0.0, 4.0), (3.0, 0.0)]);
        let mut closed = open.clone();
        closed.push(open[0]);
        let a = polygon_area(&open, AreaUnit::SquareDegrees);
        assert!((a - 6.0).abs() < 1e-12);
        assert!((polygon_area(&closed, AreaUnit::SquareDegrees) - a).abs() < 1e-12);
    }

    #[test]
    fn degenerate_area_is_zero() {
        assert_eq!(polygon_area(&pts(&[(0.0, 0.0), (1.0, 1.0)]), AreaUnit::SquareFeet), 0.0);
        assert_eq!(polygon_area(&[], AreaUnit::SquareFeet), 0.0);
    }

    #[test]
    fn area_scales_by_unit() {
        let tri = pts(&[(0.0, 0.0), (0.0, 0.001), (0.001, 0.0)]);
        let deg = polygon_area(&tri, AreaUnit::SquareDegrees);
        let sqft = polygon_area(&tri, AreaUnit::SquareFeet);
        assert!((sqft / deg - AreaUnit::SquareFeet.factor()).abs() < 1e-3);
    }

    #[test]
    fn one_degree_of_latitude_in_feet() {
        let d = haversine_feet(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(1.0, 0.0));
        // 6371 km * pi / 180 = 111.195 km
        assert!((d - 111_194.93 * FEET_PER_METER).abs() < 5.0);
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        let tri = pts(&[(0.0, 0.0), (0.0, 0.001), (0.001, 0.0)]);
        let mut closed = tri.clone();
        closed.push(tri[0]);
        let open = polygon_perimeter(&tri);
        assert!((open - polygon_perimeter(&closed)).abs() < 1e-6);

        let legs = haversine_feet(&tri[0], &tri[1]) + haversine_feet(&tri[1], &tri[2]) + haversine_feet(&tri[2], &tri[0]);
        assert!((open - legs).abs() < 1e-6);
        assert_eq!(polygon_perimeter(&tri[..1]), 0.0);
    }

    #[test]
    fn point_segment_distance_clamps() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 10.0);
        // perpendicular foot inside the segment
        assert!((point_segment_distance(&GeoPoint::new(3.0, 5.0), &a, &b) - 3.0).abs() < 1e-12);
        // beyond the end: distance to b
        assert!((point_segment_distance(&GeoPoint::new(4.0, 13.0), &a, &b) - 5.0).abs() < 1e-12);
        // degenerate segment: distance to a
        assert!((point_segment_distance(&GeoPoint::new(3.0, 4.0), &a, &a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn crossing_and_parallel_segments() {
        let (a1, a2) = (GeoPoint::new(0.0, 0.0), GeoPoint::new(2.0, 2.0));
        let (b1, b2) = (GeoPoint::new(0.0, 2.0), GeoPoint::new(2.0, 0.0));
        assert!(segments_intersect(&a1, &a2, &b1, &b2));

        let (c1, c2) = (GeoPoint::new(1.0, 0.0), GeoPoint::new(3.0, 2.0));
        assert!(!segments_intersect(&a1, &a2, &c1, &c2));

        // would cross if extended
        let (d1, d2) = (GeoPoint::new(5.0, 0.0), GeoPoint::new(4.0, 1.0));
        assert!(!segments_intersect(&a1, &a2, &d1, &d2));
    }

    #[test]
    fn bowtie_has_one_crossing() {
        let bowtie = pts(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
        assert_eq!(self_intersections(&bowtie), vec![(0, 2)]);

        let square = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(self_intersections(&square).is_empty());
    }

    #[test]
    fn closure_check() {
        let ring = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0000001, 0.0)]);
        assert!(is_closed(&ring, 1e-6));
        assert!(!is_closed(&ring[..3], 1e-6));
        assert!(!is_closed(&ring[..1], 1e-6));
    }
}
