//! CSV writing operations.

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::store::BoundaryRecord;

/// Write a DataFrame to a CSV string.
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .with_context(|| "[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .with_context(|| "[io::csv::write] CSV output is not valid UTF-8")
}

/// One row per coordinate, with the record's measurements repeated on every row.
///
/// Columns: `latitude,longitude,point_index,area_sqft,perimeter_ft,imagery_type,quality,timestamp`.
pub(crate) fn boundary_frame(record: &BoundaryRecord) -> Result<DataFrame> {
    let points = record.coordinates();
    let n = points.len();

    let latitudes = points.iter().map(|p| p.lat).collect::<Vec<_>>();
    let longitudes = points.iter().map(|p| p.lng).collect::<Vec<_>>();
    let indices = (0..n as u32).collect::<Vec<_>>();

    let area = round2(record.boundary.area);
    let perimeter = round2(record.boundary.perimeter);
    let imagery_type = record.imagery.kind.as_str().to_string();
    let quality = record.imagery.quality.clone();
    let timestamp = record.timestamp_string();

    let df = DataFrame::new(vec![
        Series::new("latitude".into(), latitudes).into(),
        Series::new("longitude".into(), longitudes).into(),
        Series::new("point_index".into(), indices).into(),
        Series::new("area_sqft".into(), vec![area; n]).into(),
        Series::new("perimeter_ft".into(), vec![perimeter; n]).into(),
        Series::new("imagery_type".into(), vec![imagery_type; n]).into(),
        Series::new("quality".into(), vec![quality; n]).into(),
        Series::new("timestamp".into(), vec![timestamp; n]).into(),
    ])?;

    Ok(df)
}

/// Write a record as CSV text.
pub(crate) fn write_boundary_csv(record: &BoundaryRecord) -> Result<String> {
    let mut df = boundary_frame(record)?;
    write_csv_string(&mut df)
}

fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }
