use serde::{Deserialize, Serialize};

use crate::{error::{BoundaryError, BoundaryResult}, geom::BBox};

/// Options for [`CoordinateValidator`](super::CoordinateValidator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidateOptions {
    /// Region points must fall in; the whole globe when `None`.
    pub region_bounds: Option<BBox>,
    /// Minimum number of input points (and of distinct points after repair). Default 3.
    pub min_vertices: usize,
    /// Maximum number of input points. Default 1000.
    pub max_vertices: usize,
    /// Points closer than this on both axes (degrees) are duplicates. Default 1e-6.
    pub duplicate_tolerance: f64,
    /// First and last point closer than this (degrees) close the ring. Default 1e-6.
    pub closure_tolerance: f64,
    /// Decimal places kept in corrected coordinates. Default 6.
    pub precision: u32,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            region_bounds: None,
            min_vertices: 3,
            max_vertices: 1000,
            duplicate_tolerance: 1e-6,
            closure_tolerance: 1e-6,
            precision: 6,
        }
    }
}

impl ValidateOptions {
    /// Restrict points to `bounds`.
    pub fn with_region(mut self, bounds: BBox) -> Self {
        self.region_bounds = Some(bounds);
        self
    }

    /// Reject out-of-range option values.
    pub fn check(&self) -> BoundaryResult<()> {
        if self.min_vertices < 3 {
            return Err(BoundaryError::invalid_option("minVertices", "must be at least 3"));
        }
        if self.max_vertices < self.min_vertices {
            return Err(BoundaryError::invalid_option("maxVertices", "must not be below minVertices"));
        }
        for (key, value) in [("duplicateTolerance", self.duplicate_tolerance), ("closureTolerance", self.closure_tolerance)] {
            if !value.is_finite() || value < 0.0 {
                return Err(BoundaryError::invalid_option(key, "must be a finite, non-negative number of degrees"));
            }
        }
        if self.precision > 15 {
            return Err(BoundaryError::invalid_option("precision", "at most 15 decimal places"));
        }
        if let Some(bounds) = &self.region_bounds {
            if !bounds.is_well_formed() {
                return Err(BoundaryError::invalid_option("regionBounds", "corners must be finite and ordered"));
            }
        }
        Ok(())
    }
}
