use std::{fs, io::Write};

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::cli::{Cli, ExportArgs};
use super::{open_store, print_json};

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let store = open_store(cli)?;
    let exported = store.export_boundary(&args.tool, args.format.into())?;

    let Some(path) = &args.output else {
        let mut out = std::io::stdout().lock();
        out.write_all(exported.data.as_bytes())?;
        if !exported.data.ends_with('\n') { writeln!(out)? }
        return Ok(());
    };

    if path.exists() && !args.force {
        bail!("[export] {} already exists (use --force to overwrite)", path.display());
    }
    fs::write(path, &exported.data)
        .with_context(|| format!("[export] Failed to write {}", path.display()))?;

    tracing::info!(tool = %args.tool, path = %path.display(), "exported boundary");
    print_json(&json!({
        "path": path,
        "filename": exported.filename,
        "contentType": exported.content_type,
        "bytes": exported.data.len(),
    }))
}
