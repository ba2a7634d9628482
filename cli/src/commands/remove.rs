use anyhow::Result;
use serde_json::json;

use crate::cli::{Cli, RemoveArgs};
use super::{open_store, print_json};

pub fn run(cli: &Cli, args: &RemoveArgs) -> Result<()> {
    let mut store = open_store(cli)?;
    let removed = store.remove_boundary(&args.tool)?;
    print_json(&json!({ "toolType": args.tool, "removed": removed }))
}
