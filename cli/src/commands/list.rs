use anyhow::Result;

use crate::cli::Cli;
use super::{open_store, print_json};

pub fn run(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    print_json(&store.list_boundaries()?)
}
