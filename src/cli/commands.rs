//! CLI commands and argument parsing

use crate::types::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tubefeed - browse paginated video feeds from the terminal
#[derive(Parser, Debug)]
#[command(name = "tubefeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
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
    /// Browse the popular listing
    Trending {
        /// Category filter
        #[arg(long, value_enum)]
        category: Option<Category>,

        /// Region code (overrides the configured region)
        #[arg(long)]
        region: Option<String>,

        /// Number of pages to walk
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Search for videos
    Search {
        /// Search text
        query: String,

        /// Number of pages to walk
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Record a watch and print the embedded-player URL
    Watch {
        /// Video id
        video_id: String,

        /// Video title, when known
        #[arg(long)]
        title: Option<String>,

        /// Channel name, when known
        #[arg(long)]
        channel: Option<String>,
    },

    /// Show the persisted watch history
    History {
        /// Clear the history instead of showing it
        #[arg(long)]
        clear: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
