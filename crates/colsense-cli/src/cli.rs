//! CLI argument definitions for `colsense`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use colsense_cli::profile::DEFAULT_SAMPLE_SIZE;

#[derive(Parser)]
#[command(
    name = "colsense",
    version,
    about = "Recognize column field types from names and sampled values",
    long_about = "Recognize the semantic type of table columns (email, phone, identifier, ...)\n\
                  from their names, then validate sampled values against the type's rules.\n\n\
                  Rules come from a JSON field-pattern catalog; the built-in catalog is used\n\
                  when none is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include sampled cell values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the field patterns in the catalog.
    Patterns(CatalogArgs),

    /// Classify a single column from its name and sample values.
    Classify(ClassifyArgs),

    /// Profile CSV extracts and report mapping insights per table.
    Profile(ProfileArgs),

    /// Write the catalog in its JSON file format.
    Export(ExportArgs),

    /// Add or replace a custom field pattern and save the catalog.
    Add(AddArgs),

    /// Remove a field pattern and save the catalog.
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Field-pattern catalog file (built-in patterns when omitted or missing).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Column name as it appears in the source table.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Sampled values; empty strings count as missing.
    #[arg(value_name = "VALUE")]
    pub values: Vec<String>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// CSV files, one table each; the header row names the columns.
    #[arg(value_name = "CSV", required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Number of data rows sampled per table.
    #[arg(long = "sample-size", value_name = "N", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Print the profiles as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination file.
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Only export patterns added with `add`.
    #[arg(long = "custom-only")]
    pub custom_only: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Type key of the pattern.
    #[arg(value_name = "TYPE_KEY")]
    pub type_key: String,

    /// Pattern definition as JSON, e.g.
    /// '{"keywords":["sku"],"validation":{"type":"regex","pattern":"^[A-Z]{3}-[0-9]+$"}}'.
    #[arg(long = "definition", value_name = "JSON")]
    pub definition: String,

    /// Catalog file to update (created from the built-in patterns if missing).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,

    /// Fail instead of replacing an existing pattern.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Type key of the pattern.
    #[arg(value_name = "TYPE_KEY")]
    pub type_key: String,

    /// Catalog file to update (created from the built-in patterns if missing).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
