use anyhow::Result;
use pavemeasure::RetrieveOptions;

use crate::cli::{Cli, RetrieveArgs};
use super::{open_store, print_json};

pub fn run(cli: &Cli, args: &RetrieveArgs) -> Result<()> {
    let store = open_store(cli)?;
    let record = store.retrieve_boundary(&args.tool, RetrieveOptions { revalidate: args.revalidate })?;
    print_json(&record)
}
