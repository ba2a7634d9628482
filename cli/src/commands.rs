pub mod export;
pub mod import;
pub mod list;
pub mod remove;
pub mod retrieve;
pub mod store;
pub mod validate;

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use pavemeasure::{BoundaryConfig, BoundaryStore, ExportFormat, FileStore, RawBoundaryInput};
use serde::Serialize;

use crate::cli::Cli;

/// Configuration from `--config`, or the defaults.
pub(crate) fn load_config(cli: &Cli) -> Result<BoundaryConfig> {
    match &cli.config {
        Some(path) => BoundaryConfig::from_path(path),
        None => Ok(BoundaryConfig::default()),
    }
}

/// File-backed store rooted at `--store-dir`.
pub(crate) fn open_store(cli: &Cli) -> Result<BoundaryStore<FileStore>> {
    let config = load_config(cli)?;
    let backend = FileStore::open(&cli.store_dir)
        .with_context(|| format!("[commands] Failed to open store directory {}", cli.store_dir.display()))?;
    tracing::debug!(dir = %cli.store_dir.display(), "opened boundary store");
    Ok(BoundaryStore::new(backend, config.store)?)
}

/// Read drawing-tool JSON input.
pub(crate) fn read_input(path: &Path) -> Result<RawBoundaryInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[commands] Failed to read {}", path.display()))?;
    pavemeasure::parse_boundary(&text, ExportFormat::Json)
        .with_context(|| format!("[commands] Invalid boundary input in {}", path.display()))
}

/// Pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("[commands] Failed to write output")?;
    writeln!(out)?;
    Ok(())
}
