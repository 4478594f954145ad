//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use shop_model::ExportFormat;

#[derive(Parser)]
#[command(
    name = "shopcsv",
    version,
    about = "Map, reprice and export product CSV files",
    long_about = "Map supplier product spreadsheets onto the 41-column WooCommerce \
                  product schema.\n\n\
                  Columns are matched automatically and can be overridden; prices get \
                  a margin and currency conversion; tags are merged; the result is \
                  written as CSV or JSON."
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

    /// Admin configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the canonical headers and whether each is exported.
    Headers,

    /// Show suggested and assigned headers for an upload.
    Map(MapArgs),

    /// Transform an upload and write the export file.
    Export(ExportArgs),

    /// List admin pricing rules.
    Rules,

    /// Submit a seller registration payload (JSON).
    Register(RegisterArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Uploaded product file (.csv or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Map a column to a header (COLUMN=HEADER; empty HEADER unmaps).
    #[arg(long = "map", value_name = "COLUMN=HEADER", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub mapping: MapArgs,

    /// Margin in percent added to every price.
    #[arg(long = "margin", value_name = "PERCENT", allow_negative_numbers = true)]
    pub margin: Option<f64>,

    /// Currency conversion multiplier applied to every price.
    #[arg(long = "rate", value_name = "RATE")]
    pub rate: Option<f64>,

    /// Take margin and rates from the admin pricing rule for this category.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Target currency code looked up in the category's conversion rates.
    #[arg(long = "currency", value_name = "CODE", requires = "category")]
    pub currency: Option<String>,

    /// Tag added to every product (repeatable).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Export only these rows (1-based, comma separated).
    #[arg(long = "rows", value_name = "N,...", value_delimiter = ',')]
    pub rows: Option<Vec<usize>>,

    /// Output format (default: from config, else csv).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Output file name without extension.
    #[arg(long = "name", value_name = "STEM")]
    pub name: Option<String>,

    /// Output directory (default: from config, else the current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RegisterArgs {
    /// Registration payload in JSON.
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
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

/// Parses `COLUMN=HEADER`. Splits on the last `=` since headers never hold one.
fn parse_override(value: &str) -> Result<(String, String), String> {
    let (column, header) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected COLUMN=HEADER, got '{value}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{value}'"));
    }
    Ok((column.to_string(), header.trim().to_string()))
}
