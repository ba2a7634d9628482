//! GeoJSON (RFC 7946) export and import of a single boundary.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};

use crate::{
    store::{BoundaryRecord, ImageryInput, ImageryType, RawBoundaryInput},
    types::GeoPoint,
};

static NO_PROPERTIES: Value = Value::Null;

/// Build a `Feature` with a `Polygon` geometry. The ring is written in
/// `[lng, lat]` order and closed.
pub(crate) fn boundary_feature(record: &BoundaryRecord) -> Value {
    let mut ring: Vec<[f64; 2]> = record.coordinates().iter()
        .map(|p| [p.lng, p.lat])
        .collect();
    if ring.len() > 1 && ring[0] != ring[ring.len() - 1] {
        ring.push(ring[0]);
    }

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": {
            "area_sqft": record.boundary.area,
            "perimeter_ft": record.boundary.perimeter,
            "units": record.boundary.units,
            "tool_type": record.tool_type,
            "timestamp": record.timestamp_string(),
            "imagery_type": record.imagery.kind,
            "imagery_quality": record.imagery.quality,
            "quality_score": record.quality_score(),
            "point_count": record.coordinates().len(),
        },
    })
}

pub(crate) fn write_boundary_geojson(record: &BoundaryRecord) -> Result<String> {
    serde_json::to_string_pretty(&boundary_feature(record))
        .context("[io::geojson] Failed to serialize GeoJSON")
}

/// Parse a Feature, a FeatureCollection (first polygonal feature) or a bare
/// Polygon/MultiPolygon geometry. Only the exterior ring of the first
/// polygon is used; properties supply measurement and imagery hints.
pub(crate) fn read_boundary_geojson(text: &str) -> Result<RawBoundaryInput> {
    let value: Value = serde_json::from_str(text).context("[io::geojson] Failed to parse GeoJSON")?;

    let (geometry, properties) = match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no 'features' array"))?;
            let feature = features.iter()
                .find(|f| is_polygonal(&f["geometry"]))
                .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection contains no Polygon feature"))?;
            (&feature["geometry"], &feature["properties"])
        }
        Some("Feature") => (&value["geometry"], &value["properties"]),
        Some("Polygon" | "MultiPolygon") => (&value, &NO_PROPERTIES),
        Some(other) => bail!("[io::geojson] Unsupported GeoJSON type '{other}'"),
        None => bail!("[io::geojson] Missing 'type' member"),
    };

    let exterior = exterior_ring(geometry)?;
    let coordinates = parse_ring_coords(exterior)?;

    let kind = properties["imagery_type"].as_str().map(ImageryType::from);
    let quality = properties["imagery_quality"].as_str().map(str::to_string);
    let imagery = (kind.is_some() || quality.is_some())
        .then(|| ImageryInput { kind, quality, ..Default::default() });

    Ok(RawBoundaryInput {
        coordinates,
        area: properties["area_sqft"].as_f64(),
        perimeter: properties["perimeter_ft"].as_f64(),
        imagery,
    })
}

fn is_polygonal(geometry: &Value) -> bool {
    matches!(geometry["type"].as_str(), Some("Polygon" | "MultiPolygon"))
}

fn exterior_ring(geometry: &Value) -> Result<&[Value]> {
    let coords = &geometry["coordinates"];
    let polygon = match geometry["type"].as_str() {
        Some("Polygon") => coords,
        Some("MultiPolygon") => &coords[0],
        Some(other) => bail!("[io::geojson] Expected a Polygon geometry, found '{other}'"),
        None => bail!("[io::geojson] Feature has no geometry"),
    };
    polygon[0].as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| anyhow!("[io::geojson] Polygon is missing its exterior ring"))
}

/// Parse `[[lng, lat], ...]`. Positions must be arrays of at least two
/// members; non-numeric members become NaN and are left to the validator.
fn parse_ring_coords(coords: &[Value]) -> Result<Vec<GeoPoint>> {
    coords.iter().enumerate()
        .map(|(i, position)| {
            let pair = position.as_array()
                .filter(|a| a.len() >= 2)
                .ok_or_else(|| anyhow!("[io::geojson] Position {i} is not a [lng, lat] pair"))?;
            let lng = pair[0].as_f64().unwrap_or(f64::NAN);
            let lat = pair[1].as_f64().unwrap_or(f64::NAN);
            Ok(GeoPoint::new(lat, lng))
        })
        .collect()
}
