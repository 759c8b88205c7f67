//! CLI argument parsing for modalfuse.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

/// modalfuse
///
/// Batch multi-modal embedder: group same-named files across modalities,
/// fuse their embeddings into fixed-dimension records, snapshot to disk
/// and upload to a remote vector index.
#[derive(Parser, Debug)]
#[command(name = "modalfuse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/modalfuse/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Tool commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory, embed its content units, write a snapshot
    Embed {
        /// Input directory of .txt/.jpg/.jpeg/.png/.json files
        #[arg(short, long)]
        input: String,

        /// Override snapshot directory
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Upload a snapshot to the configured vector index
    Upload {
        /// Override snapshot directory
        #[arg(short, long)]
        snapshot: Option<String>,

        /// Override records per upsert batch
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Override index data-plane URL
        #[arg(long)]
        index_url: Option<String>,
    },

    /// Embed a directory and upload the result in one run
    Run {
        /// Input directory of .txt/.jpg/.jpeg/.png/.json files
        #[arg(short, long)]
        input: String,

        /// Override snapshot directory
        #[arg(short, long)]
        snapshot: Option<String>,

        /// Override records per upsert batch
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Print a summary of a snapshot's records
    Inspect {
        /// Override snapshot directory
        #[arg(short, long)]
        snapshot: Option<String>,
    },
}
