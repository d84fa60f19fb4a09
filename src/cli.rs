//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse, filter and compare Linux distributions
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (bundled snapshot and storage paths are relative to it)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: tuxdex.toml)
    #[arg(short = 'C', long, default_value = "tuxdex.toml")]
    pub config: PathBuf,

    /// Override the site origin the live dataset is fetched from
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Run without a network origin: bundled snapshot only
    #[arg(long)]
    pub offline: bool,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the catalog, optionally searched, filtered and sorted
    List {
        /// Fuzzy search text
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category: all, beginner, server, security, rolling, lts, or any category text
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Sort order: popularity, name, beginner, resource
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Add a distribution to the compare tray, or remove it if already there
    Toggle {
        /// Distribution id
        id: String,
    },

    /// Show the side-by-side comparison
    Compare {
        /// Comma-separated ids, overriding the stored selection for this run
        #[arg(long)]
        ids: Option<String>,

        /// Add a distribution to the comparison
        #[arg(long)]
        add: Vec<String>,

        /// Remove a distribution from the comparison
        #[arg(long)]
        remove: Vec<String>,

        /// Empty the comparison
        #[arg(long)]
        clear: bool,
    },

    /// Show the derived badges of a distribution
    Badges {
        /// Distribution id
        id: String,
    },

    /// Inspect or drop the cached dataset
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Show when the cached dataset was saved
    Status,
    /// Delete the cached dataset
    Clear,
}
