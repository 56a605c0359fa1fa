use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jana_core::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(
    name = "jana",
    about = "Check n8n workflow exports for duplicate internal IDs"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[arg(long, global = true, env = "JANA_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a workflow export (array or n8n `{ "data": [...] }` envelope).
    Validate {
        #[arg(long)]
        input: PathBuf,

        /// Report destination; defaults to `validation.logPath`.
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report duplicates without failing.
        #[arg(long)]
        skip_validation: bool,

        /// One line per duplicate group.
        #[arg(long)]
        compact: bool,
    },
    /// Summarize a saved validation report.
    Report {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
