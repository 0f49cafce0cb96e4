use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "cue-docs-gen")]
#[command(author, version, about = "CUE schema to OpenAPI and Markdown reference generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a CUE schema or OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Convert CUE definitions into an OpenAPI component schema document
  Openapi(OpenapiCommand),
  /// Render an OpenAPI schema document into Markdown reference pages
  Markdown(MarkdownCommand),
}

#[derive(Args, Debug, Clone)]
pub struct OpenapiCommand {
  /// Path to the CUE schema file
  #[arg(short, long, value_name = "FILE", default_value = "spec/schema.cue")]
  pub input: PathBuf,

  /// Path where the OpenAPI document is written (.json for JSON, YAML otherwise)
  #[arg(short, long, value_name = "FILE", default_value = "openapi.yaml")]
  pub output: PathBuf,

  /// Title written to the document info block
  #[arg(long, default_value = "Schema")]
  pub title: String,

  /// Version written to the document info block
  #[arg(long, value_name = "VERSION")]
  pub schema_version: Option<String>,

  /// File holding the version, used when --schema-version is not given
  #[arg(long, value_name = "FILE")]
  pub version_file: Option<PathBuf>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MarkdownCommand {
  /// Path to the OpenAPI YAML or JSON document
  #[arg(short, long, value_name = "FILE", default_value = "openapi.yaml")]
  pub input: PathBuf,

  /// Directory where the markdown pages are written
  #[arg(short, long, value_name = "DIR", default_value = "spec")]
  pub output: PathBuf,

  /// JSON manifest mapping source files to schema names, one page per file
  #[arg(long, value_name = "FILE")]
  pub manifest: Option<PathBuf>,

  /// YAML nav file listing pages and their schemas, one page per entry
  #[arg(long, value_name = "FILE")]
  pub nav: Option<PathBuf>,

  /// Root schemas for a single schema.md (comma-separated)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub roots: Option<Vec<String>>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every schema with its kind and description
  Schemas {
    /// Path to a .cue schema or an OpenAPI YAML/JSON document
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
