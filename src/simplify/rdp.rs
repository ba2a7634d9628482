//! Ramer-Douglas-Peucker simplification.

use crate::{geom::point_segment_distance, types::GeoPoint};

/// Indices kept by Douglas-Peucker at `tolerance` degrees, in ascending order.
///
/// The first and last point are always kept. When several points share the
/// maximum deviation the lowest index wins.
pub(crate) fn douglas_peucker(points: &[GeoPoint], tolerance: f64) -> Vec<usize> {
    if points.len() < 3 { return (0..points.len()).collect() }

    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 { continue }

        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in (start + 1)..end {
            let d = point_segment_distance(&points[i], &points[start], &points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            kept[max_idx] = true;
            stack.push((max_idx, end));
            stack.push((start, max_idx));
        }
    }

    kept.iter().enumerate().filter_map(|(i, &k)| k.then_some(i)).collect()
}
