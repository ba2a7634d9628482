use std::fs;

use anyhow::{Context, Result};
use pavemeasure::ExportFormat;

use crate::cli::{Cli, ImportArgs};
use super::{open_store, print_json};

pub fn run(cli: &Cli, args: &ImportArgs) -> Result<()> {
    let format = match args.format {
        Some(format) => ExportFormat::from(format),
        None => ExportFormat::from_path(&args.file).with_context(|| {
            format!("[import] Cannot infer format of {}; pass --format", args.file.display())
        })?,
    };
    let data = fs::read_to_string(&args.file)
        .with_context(|| format!("[import] Failed to read {}", args.file.display()))?;

    let mut store = open_store(cli)?;
    let record = store.import_boundary(&args.tool, &data, format)?;
    print_json(&record)
}
