use std::path::PathBuf;

use pavemeasure::ExportFormat;

/// Boundary measurement CLI
#[derive(clap::Parser, Debug)]
#[command(name = "pavemeasure", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory holding stored boundaries
    #[arg(long, global = true, default_value = ".pavemeasure", value_hint = clap::ValueHint::DirPath)]
    pub store_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Validate a drawn boundary without storing it
    Validate(ValidateArgs),

    /// Validate, compress, score and store a boundary
    Store(StoreArgs),

    /// Print a stored boundary
    Retrieve(RetrieveArgs),

    /// Export a stored boundary as JSON, GeoJSON or CSV
    Export(ExportArgs),

    /// Import a boundary file and store it
    Import(ImportArgs),

    /// Delete a stored boundary
    Remove(RemoveArgs),

    /// List stored tool types
    List,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// JSON input: `{"coordinates": [...]}` or a bare array of `{lat, lng}`
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct StoreArgs {
    /// Measurement tool the boundary belongs to, e.g. driveway
    pub tool: String,

    /// JSON input: `{"coordinates": [...]}` or a bare array of `{lat, lng}`
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RetrieveArgs {
    pub tool: String,

    /// Re-run validation and scoring on the stored coordinates
    #[arg(long)]
    pub revalidate: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum FormatArg { Json, Geojson, Csv }

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Geojson => ExportFormat::GeoJson,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    pub tool: String,

    #[arg(short, long, value_enum)]
    pub format: FormatArg,

    /// Output file; the export is printed to stdout when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    pub tool: String,

    /// File to import
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Input format, inferred from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    pub tool: String,
}
