//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Transex - Extract transition triplets from French news articles.
#[derive(Debug, Parser)]
#[command(name = "transex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TRANSEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract triplets from documents and write the dataset artifacts
    Extract(ExtractArgs),

    /// Show per-document diagnostics without writing anything
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Documents to process (.docx or .txt), in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory for the artifacts
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the ZIP archive
    #[arg(long, conflicts_with = "no_zip")]
    pub zip: bool,

    /// Do not write the ZIP archive
    #[arg(long)]
    pub no_zip: bool,

    /// Do not write the individual artifact files
    #[arg(long)]
    pub no_files: bool,

    /// Emit trace events for transitions containing this text (repeatable)
    #[arg(long = "trace", value_name = "PHRASE")]
    pub trace: Vec<String>,

    /// Number of sample triplets to print
    #[arg(long, default_value = "5")]
    pub samples: usize,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Documents to inspect (.docx or .txt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum number of transitions listed per document
    #[arg(long, default_value = "20")]
    pub show: usize,
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

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ExtractArgs {
    /// Resolve the ZIP flags against the configured default.
    pub fn write_zip(&self, default: bool) -> bool {
        if self.no_zip {
            false
        } else if self.zip {
            true
        } else {
            default
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
