#![doc = "pavemeasure public API"]
mod config;
mod error;
mod geom;
mod io;
mod quality;
mod simplify;
mod store;
mod types;
mod validate;

#[doc(inline)]
pub use config::BoundaryConfig;

#[doc(inline)]
pub use error::{BoundaryError, BoundaryResult, Issue, IssueKind, StoreError};

#[doc(inline)]
pub use types::{AreaUnit, GeoPoint, LinearUnit, MeasurementUnits};

#[doc(inline)]
pub use geom::{
    haversine_feet, is_closed, point_segment_distance, polygon_area, polygon_perimeter,
    segments_intersect, self_intersections, BBox, GeometryMetrics,
};

#[doc(inline)]
pub use validate::{
    validate_coordinates, validate_geometry, CoordinateValidator, GeometryLimits,
    GeometryValidation, ValidateOptions, ValidationMetadata, ValidationResult,
};

#[doc(inline)]
pub use simplify::{compress, CompressOptions, CompressionMethod, CompressionResult};

#[doc(inline)]
pub use quality::{score, summarize, QualityStatus, QualitySummary};

#[doc(inline)]
pub use store::{
    fingerprint, BoundaryData, BoundaryRecord, BoundaryStore, FileStore, ImageryInput,
    ImageryMetadata, ImageryType, KeyValueStore, MemoryStore, RawBoundaryInput, RecordValidation,
    RetrieveOptions, StorageLimits, StoreOptions, ThumbnailData,
};

#[doc(inline)]
pub use io::{
    export_filename, export_record, parse_boundary, ExportFormat, ExportedBoundary,
    ThumbnailOptions, CSV_HEADER,
};

/// Render a boundary thumbnail, mapping render failures to [`BoundaryError::Export`].
pub fn render_thumbnail(ring: &[GeoPoint], quality: Option<u8>, options: &ThumbnailOptions) -> BoundaryResult<ThumbnailData> {
    io::render_thumbnail(ring, quality, options)
        .map_err(|e| BoundaryError::export("svg", format!("{e:#}")))
}
