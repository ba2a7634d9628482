//! Pure geometry over geographic points: planar area, great-circle perimeter,
//! point/segment distance and segment intersection.
mod bbox;
mod kernel;
mod metrics;

pub use bbox::BBox;
pub use kernel::{
    haversine_feet, is_closed, point_segment_distance, polygon_area, polygon_perimeter,
    segments_intersect, self_intersections, EARTH_RADIUS_M, PARALLEL_EPSILON,
};
pub use metrics::{complexity, GeometryMetrics};
