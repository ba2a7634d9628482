//! Lossy compression of boundary rings: Douglas-Peucker with a uniform
//! sampling fallback that caps the output size.
mod rdp;
mod sampling;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::{BoundaryError, BoundaryResult}, types::GeoPoint};

/// Triangle plus its closing point.
const COLLAPSED_RING_POINTS: usize = 4;

/// Options for [`compress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CompressOptions {
    /// Douglas-Peucker tolerance in degrees. Default 1e-5 (about 1 m).
    pub tolerance: f64,
    /// Largest output size. Default 500.
    pub max_points: usize,
    /// Inputs shorter than this are left untouched. Default 100.
    pub min_input_size: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self { tolerance: 1e-5, max_points: 500, min_input_size: 100 }
    }
}

impl CompressOptions {
    pub fn check(&self) -> BoundaryResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(BoundaryError::invalid_option("tolerance", "must be a finite, non-negative number of degrees"));
        }
        if self.max_points < 3 {
            return Err(BoundaryError::invalid_option("maxPoints", "must be at least 3"));
        }
        Ok(())
    }
}

/// How a ring was compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionMethod {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "douglas-peucker")]
    DouglasPeucker,
    #[serde(rename = "douglas-peucker + uniform-sampling")]
    DouglasPeuckerUniformSampling,
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompressionMethod::None => "none",
            CompressionMethod::DouglasPeucker => "douglas-peucker",
            CompressionMethod::DouglasPeuckerUniformSampling => "douglas-peucker + uniform-sampling",
        })
    }
}

/// A compressed ring and how much it shrank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionResult {
    pub original_count: usize,
    pub compressed_count: usize,
    /// `compressed_count / original_count`.
    pub compression_ratio: f64,
    pub coordinates: Vec<GeoPoint>,
    pub method: CompressionMethod,
}

/// Compress `points`, keeping first and last.
///
/// Inputs below `min_input_size` pass through unchanged. Otherwise
/// Douglas-Peucker runs at `tolerance`, and if the result still exceeds
/// `max_points` it is uniformly sampled down to exactly `max_points`.
pub fn compress(points: &[GeoPoint], options: &CompressOptions) -> BoundaryResult<CompressionResult> {
    options.check()?;
    if points.len() < 3 {
        return Err(BoundaryError::invalid_option("points", format!("need at least 3 points to compress, got {}", points.len())));
    }

    if points.len() < options.min_input_size {
        return Ok(finish(points, points.to_vec(), CompressionMethod::None));
    }

    let simplified: Vec<GeoPoint> = rdp::douglas_peucker(points, options.tolerance).into_iter()
        .map(|i| points[i])
        .collect();

    // A closed ring whose vertices all fall within tolerance of its start
    // collapses to the two endpoints; sample a closed triangle from the
    // original instead.
    let (source, target) = if simplified.len() < 3 {
        (points, options.max_points.min(COLLAPSED_RING_POINTS))
    } else if simplified.len() > options.max_points {
        (simplified.as_slice(), options.max_points)
    } else {
        return Ok(finish(points, simplified, CompressionMethod::DouglasPeucker));
    };
    let method = CompressionMethod::DouglasPeuckerUniformSampling;

    Ok(finish(points, sample_ring(source, target), method))
}

/// Uniformly sample `source` down to at most `target` points.
///
/// A closed source keeps its closing point only when there is room for three
/// distinct vertices besides it; otherwise an open triangle is returned.
fn sample_ring(source: &[GeoPoint], target: usize) -> Vec<GeoPoint> {
    let closed = source.len() > 1 && source.first() == source.last();
    if !closed {
        return sampling::uniform_indices(source.len(), target).into_iter().map(|i| source[i]).collect();
    }

    let open = &source[..source.len() - 1];
    let distinct = if target >= COLLAPSED_RING_POINTS { target - 1 } else { target };
    let mut sampled: Vec<GeoPoint> = sampling::uniform_indices(open.len(), distinct).into_iter()
        .map(|i| open[i])
        .collect();
    if sampled.len() < target { sampled.push(source[0]) }
    sampled
}

fn finish(original: &[GeoPoint], coordinates: Vec<GeoPoint>, method: CompressionMethod) -> CompressionResult {
    tracing::debug!(original = original.len(), compressed = coordinates.len(), %method, "compressed boundary");
    CompressionResult {
        original_count: original.len(),
        compressed_count: coordinates.len(),
        compression_ratio: coordinates.len() as f64 / original.len() as f64,
        coordinates,
        method,
    }
}
