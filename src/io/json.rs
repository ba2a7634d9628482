//! Plain JSON export and import.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    store::{BoundaryRecord, ImageryInput, RawBoundaryInput},
    types::GeoPoint,
};

pub(crate) fn write_boundary_json(record: &BoundaryRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("[io::json] Failed to serialize boundary record")
}

/// Anything a user might hand us as JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonBoundary {
    Record(Box<BoundaryRecord>),
    Raw(RawBoundaryInput),
    Points(Vec<GeoPoint>),
}

/// Accept a full exported record, a drawing-tool payload, or a bare point array.
pub(crate) fn read_boundary_json(text: &str) -> Result<RawBoundaryInput> {
    let parsed: JsonBoundary = serde_json::from_str(text)
        .context("[io::json] Expected a boundary record, an object with 'coordinates', or an array of points")?;

    Ok(match parsed {
        JsonBoundary::Record(record) => raw_from_record(*record),
        JsonBoundary::Raw(raw) => raw,
        JsonBoundary::Points(coordinates) => RawBoundaryInput::new(coordinates),
    })
}

/// Turn a stored record back into pipeline input, keeping its measurements
/// and imagery as hints.
pub(crate) fn raw_from_record(record: BoundaryRecord) -> RawBoundaryInput {
    let imagery = record.imagery;
    RawBoundaryInput {
        coordinates: record.boundary.coordinates,
        area: Some(record.boundary.area),
        perimeter: Some(record.boundary.perimeter),
        imagery: Some(ImageryInput {
            kind: Some(imagery.kind),
            source: Some(imagery.source),
            date: Some(imagery.date),
            quality: Some(imagery.quality),
            resolution: Some(imagery.resolution),
            accuracy: Some(imagery.accuracy),
        }),
    }
}
