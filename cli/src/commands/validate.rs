use anyhow::Result;
use pavemeasure::{
    summarize, validate_coordinates, validate_geometry, GeometryValidation, QualitySummary,
    ValidationResult,
};
use serde::Serialize;

use crate::cli::{Cli, ValidateArgs};
use super::{load_config, print_json, read_input};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateReport {
    validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    geometry: Option<GeometryValidation>,
    summary: QualitySummary,
}

pub fn run(cli: &Cli, args: &ValidateArgs) -> Result<()> {
    let config = load_config(cli)?;
    let input = read_input(&args.input)?;

    let mut validation = validate_coordinates(&input.coordinates, &config.store.validation);
    let geometry = validation.is_valid.then(|| {
        validate_geometry(validation.coordinates(), input.area, input.perimeter, &config.store.geometry)
    });
    if let Some(geometry) = &geometry {
        validation.absorb_geometry(geometry);
    }

    let summary = summarize(&validation);
    tracing::info!(valid = validation.is_valid, quality = summary.quality, "validated {}", args.input.display());
    print_json(&ValidateReport { validation, geometry, summary })
}
