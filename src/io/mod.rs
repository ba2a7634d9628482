//! Export and import of boundary records, organized by format.
//!
//! # Format Modules
//!
//! - `json` - direct serialization of [`BoundaryRecord`]
//! - `geojson` - RFC 7946 `Polygon` Feature with measurements as properties
//! - `csv` - one row per vertex, measurements repeated on every row
//! - `svg` - thumbnails embedded in records

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod json;
pub(crate) mod svg;

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{BoundaryError, BoundaryResult},
    store::{BoundaryRecord, RawBoundaryInput},
};

pub use csv::CSV_HEADER;
pub use svg::{render_thumbnail, ThumbnailOptions};

/// Serialization formats for export and import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    GeoJson,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::GeoJson, ExportFormat::Csv];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::GeoJson => "geojson",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::GeoJson => "application/geo+json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "geojson" => Ok(ExportFormat::GeoJson),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(BoundaryError::invalid_option("format", format!("unsupported format '{other}' (expected json, geojson or csv)"))),
        }
    }
}

/// An exported record ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedBoundary {
    pub data: String,
    pub filename: String,
    pub content_type: String,
}

/// `boundary_{toolType}_{YYYYMMDD}.{ext}`, dated by the record's timestamp.
pub fn export_filename(record: &BoundaryRecord, format: ExportFormat) -> String {
    format!("boundary_{}_{}.{}", record.tool_type, record.timestamp.format("%Y%m%d"), format.extension())
}

/// Serialize a record in `format`.
pub fn export_record(record: &BoundaryRecord, format: ExportFormat) -> BoundaryResult<ExportedBoundary> {
    let data = match format {
        ExportFormat::Json => json::write_boundary_json(record),
        ExportFormat::GeoJson => geojson::write_boundary_geojson(record),
        ExportFormat::Csv => csv::write_boundary_csv(record),
    }
    .map_err(|e| BoundaryError::export(format, format!("{e:#}")))?;

    Ok(ExportedBoundary {
        data,
        filename: export_filename(record, format),
        content_type: format.content_type().to_string(),
    })
}

/// Parse `data` in `format` into pipeline input.
pub fn parse_boundary(data: &str, format: ExportFormat) -> BoundaryResult<RawBoundaryInput> {
    match format {
        ExportFormat::Json => json::read_boundary_json(data),
        ExportFormat::GeoJson => geojson::read_boundary_geojson(data),
        ExportFormat::Csv => csv::read_boundary_csv(data),
    }
    .map_err(|e| BoundaryError::import(format, format!("{e:#}")))
}
