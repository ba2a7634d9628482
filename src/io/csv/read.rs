//! CSV reading operations.

use std::io::Cursor;

use anyhow::{Context, Result, bail, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};

use crate::{
    store::{ImageryInput, ImageryType, RawBoundaryInput},
    types::GeoPoint,
};

/// Reads a CSV from a string.
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Parse boundary CSV text back into a raw boundary.
///
/// Only `latitude` and `longitude` are required. Rows are ordered by
/// `point_index` when that column is present; the first row supplies the
/// area, perimeter and imagery fields. Unparsable numbers become NaN so the
/// validator reports them.
pub(crate) fn read_boundary_csv(csv: &str) -> Result<RawBoundaryInput> {
    ensure!(!csv.trim().is_empty(), "[io::csv::read] CSV is empty");
    let df = read_csv_string(csv)?;
    read_boundary_frame(&df)
}

pub(crate) fn read_boundary_frame(df: &DataFrame) -> Result<RawBoundaryInput> {
    for required in ["latitude", "longitude"] {
        if df.column(required).is_err() {
            bail!("[io::csv::read] CSV must have a '{required}' column");
        }
    }

    let latitudes = float_column(df, "latitude")?.context("[io::csv::read] missing latitude")?;
    let longitudes = float_column(df, "longitude")?.context("[io::csv::read] missing longitude")?;

    let mut rows = latitudes.into_iter()
        .zip(longitudes)
        .enumerate()
        .map(|(row, (lat, lng))| (row as f64, GeoPoint::new(lat.unwrap_or(f64::NAN), lng.unwrap_or(f64::NAN))))
        .collect::<Vec<_>>();

    if let Some(indices) = float_column(df, "point_index")? {
        for ((order, _), index) in rows.iter_mut().zip(indices) {
            if let Some(index) = index.filter(|i| i.is_finite()) { *order = index }
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let area = first_value(float_column(df, "area_sqft")?).filter(|a| a.is_finite());
    let perimeter = first_value(float_column(df, "perimeter_ft")?).filter(|p| p.is_finite());

    let kind = first_value(string_column(df, "imagery_type")?)
        .map(|t| ImageryType::from(t.as_str()));
    let quality = first_value(string_column(df, "quality")?);
    let imagery = (kind.is_some() || quality.is_some())
        .then(|| ImageryInput { kind, quality, ..Default::default() });

    Ok(RawBoundaryInput {
        coordinates: rows.into_iter().map(|(_, p)| p).collect(),
        area,
        perimeter,
        imagery,
    })
}

/// Column cast to f64 (unparsable cells become null), or `None` if absent.
fn float_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else { return Ok(None) };
    let values = column.cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] Column '{name}' is not numeric"))?;
    Ok(Some(values.f64()?.into_iter().collect()))
}

fn string_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else { return Ok(None) };
    let values = column.cast(&DataType::String)?;
    Ok(Some(values.str()?.into_iter().map(|s| s.map(str::to_string)).collect()))
}

fn first_value<T>(column: Option<Vec<Option<T>>>) -> Option<T> {
    column?.into_iter().next().flatten()
}
