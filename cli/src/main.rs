mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{export, import, list, remove, retrieve, store, validate};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Validate(args) => validate::run(&cli, args),
        Commands::Store(args) => store::run(&cli, args),
        Commands::Retrieve(args) => retrieve::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Import(args) => import::run(&cli, args),
        Commands::Remove(args) => remove::run(&cli, args),
        Commands::List => list::run(&cli),
    }
}

/// Log to stderr at warn, info or debug for 0, 1 or 2+ `-v`; `RUST_LOG` overrides.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> { run() }
