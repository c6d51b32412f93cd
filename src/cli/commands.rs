//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagerkit CLI
#[derive(Parser, Debug)]
#[command(name = "pagerkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a source configuration
    Validate,

    /// Run the total-count query
    Count,

    /// Page forward through the source and print each page
    Fetch {
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Override the configured page size
        #[arg(long)]
        page_size: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}
