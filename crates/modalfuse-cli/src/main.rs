//! modalfuse — batch multi-modal embedder and vector-index uploader.
//!
//! # Usage
//!
//! ```bash
//! modalfuse embed --input ./data/chapter01
//! modalfuse upload
//! modalfuse run --input ./data/chapter01
//! modalfuse inspect
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/modalfuse/config.toml)
//! 3. Environment variables (MODALFUSE_*)
//! 4. CLI flags
//!
//! API keys fall back to OPENAI_API_KEY (embedding) and PINECONE_API_KEY
//! (sink) when not configured.

use anyhow::Result;
use clap::Parser;

use modalfuse_cli::{
    handle_embed, handle_inspect, handle_run, handle_upload, setup, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = setup(cli.config.as_deref(), cli.log_level.as_deref())?;

    match cli.command {
        Commands::Embed { input, snapshot } => {
            if let Some(snapshot) = snapshot {
                settings.snapshot_dir = snapshot;
            }
            handle_embed(&settings, &input).await?;
        }
        Commands::Upload {
            snapshot,
            batch_size,
            index_url,
        } => {
            if let Some(snapshot) = snapshot {
                settings.snapshot_dir = snapshot;
            }
            if let Some(batch_size) = batch_size {
                settings.sink.batch_size = batch_size;
            }
            if let Some(index_url) = index_url {
                settings.sink.index_url = Some(index_url);
            }
            handle_upload(&settings).await?;
        }
        Commands::Run {
            input,
            snapshot,
            batch_size,
        } => {
            if let Some(snapshot) = snapshot {
                settings.snapshot_dir = snapshot;
            }
            if let Some(batch_size) = batch_size {
                settings.sink.batch_size = batch_size;
            }
            handle_run(&settings, &input).await?;
        }
        Commands::Inspect { snapshot } => {
            if let Some(snapshot) = snapshot {
                settings.snapshot_dir = snapshot;
            }
            handle_inspect(&settings).await?;
        }
    }

    Ok(())
}
