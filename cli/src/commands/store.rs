use anyhow::Result;

use crate::cli::{Cli, StoreArgs};
use super::{open_store, print_json, read_input};

pub fn run(cli: &Cli, args: &StoreArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let mut store = open_store(cli)?;
    let record = store.store_boundary(&args.tool, &input)?;
    print_json(&record)
}
