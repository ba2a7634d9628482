//! CSV format: one row per boundary vertex.

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;

/// Header row of boundary CSV exports.
pub const CSV_HEADER: &str = "latitude,longitude,point_index,area_sqft,perimeter_ft,imagery_type,quality,timestamp";
