//! Command handlers for the modalfuse CLI.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use modalfuse_embeddings::{ApiEmbedder, ApiEmbedderConfig};
use modalfuse_ingest::{EmbedPipeline, PipelineConfig, PipelineStats};
use modalfuse_sink::{HttpSink, HttpSinkConfig, Uploader, UploaderConfig, UploadStats};
use modalfuse_types::{Settings, Snapshot};

/// Load settings and initialize logging. Called once per invocation.
pub fn setup(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(settings)
}

fn build_pipeline(settings: &Settings) -> Result<EmbedPipeline<ApiEmbedder>> {
    let config = ApiEmbedderConfig::from_settings(&settings.embedding)
        .context("Embedding service configuration")?;
    let embedder = ApiEmbedder::new(config).context("Failed to build embedding client")?;
    Ok(EmbedPipeline::new(
        Arc::new(embedder),
        PipelineConfig {
            concurrency: settings.embedding.concurrency,
            continue_on_error: true,
        },
    ))
}

fn build_uploader(settings: &Settings) -> Result<Uploader<HttpSink>> {
    let config =
        HttpSinkConfig::from_settings(&settings.sink).context("Sink configuration")?;
    let sink = HttpSink::new(config).context("Failed to build sink client")?;
    Ok(Uploader::new(
        Arc::new(sink),
        UploaderConfig {
            batch_size: settings.sink.batch_size,
        },
    ))
}

async fn embed_to_snapshot(settings: &Settings, input: &str) -> Result<(Snapshot, PipelineStats)> {
    let pipeline = build_pipeline(settings)?;
    let (snapshot, stats) = pipeline
        .embed_directory(Path::new(input))
        .await
        .with_context(|| format!("Failed to embed directory {input}"))?;

    info!(
        assembled = stats.records_assembled,
        errors = stats.errors,
        "Embed finished"
    );
    Ok((snapshot, stats))
}

fn report_upload(stats: &UploadStats) -> Result<()> {
    if stats.batches_failed > 0 {
        bail!(
            "{} batch(es) failed after retry; {} vectors uploaded",
            stats.batches_failed,
            stats.vectors_uploaded
        );
    }
    Ok(())
}

/// `modalfuse embed` — scan, embed, save snapshot.
pub async fn handle_embed(settings: &Settings, input: &str) -> Result<()> {
    let (snapshot, stats) = embed_to_snapshot(settings, input).await?;

    let snapshot_dir = settings.snapshot_path();
    snapshot
        .save(&snapshot_dir)
        .with_context(|| format!("Failed to save snapshot to {}", snapshot_dir.display()))?;

    println!(
        "Embedded {} of {} unit(s) into {} ({} error(s))",
        stats.records_assembled,
        stats.units_processed,
        snapshot_dir.display(),
        stats.errors
    );
    Ok(())
}

/// `modalfuse upload` — load snapshot, upsert all records.
pub async fn handle_upload(settings: &Settings) -> Result<()> {
    let snapshot_dir = settings.snapshot_path();
    let snapshot = Snapshot::load(&snapshot_dir)
        .with_context(|| format!("Failed to load snapshot from {}", snapshot_dir.display()))?;

    let uploader = build_uploader(settings)?;
    let stats = uploader.upload_snapshot(&snapshot).await;

    println!(
        "Uploaded {} vector(s) in {} batch(es), {} batch(es) failed",
        stats.vectors_uploaded, stats.batches_sent, stats.batches_failed
    );
    report_upload(&stats)
}

/// `modalfuse run` — embed then upload without reloading from disk.
pub async fn handle_run(settings: &Settings, input: &str) -> Result<()> {
    let (snapshot, embed_stats) = embed_to_snapshot(settings, input).await?;

    let snapshot_dir = settings.snapshot_path();
    snapshot
        .save(&snapshot_dir)
        .with_context(|| format!("Failed to save snapshot to {}", snapshot_dir.display()))?;

    let uploader = build_uploader(settings)?;
    let stats = uploader.upload_snapshot(&snapshot).await;

    println!(
        "Embedded {} unit(s), uploaded {} vector(s), {} embed error(s), {} failed batch(es)",
        embed_stats.records_assembled,
        stats.vectors_uploaded,
        embed_stats.errors,
        stats.batches_failed
    );
    report_upload(&stats)
}

/// `modalfuse inspect` — print a per-record summary of a snapshot.
pub async fn handle_inspect(settings: &Settings) -> Result<()> {
    let snapshot_dir = settings.snapshot_path();
    let snapshot = Snapshot::load(&snapshot_dir)
        .with_context(|| format!("Failed to load snapshot from {}", snapshot_dir.display()))?;

    println!(
        "Snapshot {} — {} record(s)",
        snapshot_dir.display(),
        snapshot.len()
    );
    for record in snapshot.records() {
        let text_preview: String = record.metadata.text.chars().take(60).collect();
        println!("- {} (dimension {})", record.id, record.dimension());
        if !text_preview.is_empty() {
            println!("    text: {text_preview}");
        }
        if !record.metadata.image_path.is_empty() {
            println!("    image: {}", record.metadata.image_path);
        }
        if record.metadata.metadata != "{}" {
            println!("    metadata: {} bytes", record.metadata.metadata.len());
        }
    }
    Ok(())
}
