//! Command line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Watched Enricher - Add TMDB IDs, English titles and posters to your watched list
#[derive(Parser, Debug)]
#[command(name = "watched-enricher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve entries and write TMDB data back to the record file
    Update {
        #[command(flatten)]
        run: RunArgs,

        /// Write the record file every N entries
        #[arg(long, value_name = "N")]
        save_every: Option<usize>,

        /// Do not skip already-updated entries
        #[arg(long)]
        no_resume: bool,

        /// Output file for update errors
        #[arg(long, default_value = "logs/tmdb_errors.txt")]
        error_log: PathBuf,
    },

    /// Check matches without updating the record file
    Check {
        #[command(flatten)]
        run: RunArgs,

        /// Output file for check mismatches
        #[arg(long, default_value = "logs/tmdb_check_mismatches.txt")]
        check_output: PathBuf,

        /// Append to the check output file
        #[arg(long)]
        check_append: bool,
    },

    /// List entries that have no TMDB ID yet
    Missing {
        /// Path to watched.yaml
        #[arg(long, default_value = "data/watched.yaml")]
        file: PathBuf,

        /// Output file for the listing
        #[arg(short, long, default_value = "logs/tmdb_errors.txt")]
        output: PathBuf,
    },
}

/// Arguments shared by `update` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to watched.yaml
    #[arg(long, default_value = "data/watched.yaml")]
    pub file: PathBuf,

    /// TMDB read access token (or set TMDB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Seconds to sleep between entries
    #[arg(long, value_name = "SECONDS")]
    pub sleep: Option<f64>,

    /// Process at most N entries (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Skip the first N entries
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Log match lookup errors for diagnostics
    #[arg(long)]
    pub debug_match: bool,

    /// Output file for match lookup errors
    #[arg(long, default_value = "logs/tmdb_match_errors.txt")]
    pub debug_log: PathBuf,
}
