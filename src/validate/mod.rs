//! Coordinate and geometry validation for drawn boundaries.
mod coords;
mod geometry;
mod options;
mod result;

pub use coords::{validate_coordinates, CoordinateValidator};
pub use geometry::{validate_geometry, GeometryLimits, GeometryValidation};
pub use options::ValidateOptions;
pub use result::{ValidationMetadata, ValidationResult};
