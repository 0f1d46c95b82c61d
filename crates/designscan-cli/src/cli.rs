//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// designscan - Extract structured design findings from design-file JSON.
#[derive(Debug, Parser)]
#[command(name = "designscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "DESIGNSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a design-file JSON document
    Analyze(AnalyzeArgs),

    /// List the configured categories
    Categories,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Design-file JSON document, or `-` for stdin
    pub document: String,

    /// Output file, or `-` for stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Category to extract (repeatable; replaces the configured list)
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Fail when the reply raises validation warnings
    #[arg(long)]
    pub strict: bool,

    /// Maximum document characters sent to the model
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Model name
    #[arg(short, long, env = "DESIGNSCAN_MODEL")]
    pub model: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long, env = "DESIGNSCAN_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// CSV (default)
    Csv,
    /// JSON with findings, warnings and metadata
    Json,
    /// Table on the terminal
    Table,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Csv => OutputFormat::Csv,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Table => OutputFormat::Table,
        }
    }
}
