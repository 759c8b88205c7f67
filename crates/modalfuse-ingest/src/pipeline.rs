//! Embed pipeline: content units to assembled combined records.
//!
//! For each unit the pipeline reads the present sources, obtains one raw
//! embedding per modality, normalizes each to its fixed dimension, and
//! assembles a combined record. One unit's failure never aborts the batch:
//! the unit is skipped with a logged cause and the run continues.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use modalfuse_embeddings::EmbeddingProvider;
use modalfuse_types::{
    CombinedRecord, ContentUnit, Modality, ModalityVector, RecordMetadata, Snapshot,
};

use crate::error::IngestError;
use crate::grouper::scan_units;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bound on concurrently processed units, guarding the embedding
    /// service from overload.
    pub concurrency: usize,
    /// Whether to continue on individual unit errors.
    pub continue_on_error: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            continue_on_error: true,
        }
    }
}

/// Statistics from an embed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    /// Number of units processed
    pub units_processed: usize,
    /// Number of records successfully assembled
    pub records_assembled: usize,
    /// Number of units skipped (no usable modality)
    pub units_skipped: usize,
    /// Number of units that failed and were dropped
    pub errors: usize,
}

impl PipelineStats {
    /// Merge another stats into this one.
    pub fn merge(&mut self, other: &PipelineStats) {
        self.units_processed += other.units_processed;
        self.records_assembled += other.records_assembled;
        self.units_skipped += other.units_skipped;
        self.errors += other.errors;
    }
}

/// Embed pipeline over a generic embedding provider.
pub struct EmbedPipeline<P: EmbeddingProvider> {
    provider: Arc<P>,
    config: PipelineConfig,
}

impl<P: EmbeddingProvider> EmbedPipeline<P> {
    /// Create a new pipeline.
    pub fn new(provider: Arc<P>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Scan a directory and embed every unit found in it.
    ///
    /// A missing directory is the one fatal input error; everything after
    /// that is per-unit and isolated.
    pub async fn embed_directory(
        &self,
        dir: &Path,
    ) -> Result<(Snapshot, PipelineStats), IngestError> {
        let units = scan_units(dir)?;
        self.run(&units).await
    }

    /// Embed a set of content units into a snapshot.
    pub async fn run(
        &self,
        units: &[ContentUnit],
    ) -> Result<(Snapshot, PipelineStats), IngestError> {
        let mut snapshot = Snapshot::new();
        let mut stats = PipelineStats::default();

        if units.is_empty() {
            debug!("No units to embed");
            return Ok((snapshot, stats));
        }

        info!(units = units.len(), "Embedding content units");

        let concurrency = self.config.concurrency.max(1);
        let mut results = stream::iter(units.iter())
            .map(|unit| async move { (unit, self.process_unit(unit).await) })
            .buffer_unordered(concurrency);

        while let Some((unit, result)) = results.next().await {
            stats.units_processed += 1;
            match result {
                Ok(Some(record)) => {
                    debug!(unit = %record.id, "Assembled record");
                    snapshot.insert(record);
                    stats.records_assembled += 1;
                }
                Ok(None) => {
                    debug!(unit = %unit.base_name, "No usable modality, skipping");
                    stats.units_skipped += 1;
                }
                Err(e) => {
                    warn!(unit = %unit.base_name, error = %e, "Failed to embed unit");
                    if !self.config.continue_on_error {
                        return Err(e);
                    }
                    stats.errors += 1;
                }
            }
        }

        info!(
            processed = stats.units_processed,
            assembled = stats.records_assembled,
            skipped = stats.units_skipped,
            errors = stats.errors,
            "Embed run complete"
        );

        Ok((snapshot, stats))
    }

    /// Process a single unit into an assembled record.
    ///
    /// Returns `Ok(None)` for a unit with no usable modality.
    async fn process_unit(
        &self,
        unit: &ContentUnit,
    ) -> Result<Option<CombinedRecord>, IngestError> {
        if unit.is_empty() {
            return Ok(None);
        }

        let mut vectors: HashMap<Modality, ModalityVector> = HashMap::new();
        let mut payload = RecordMetadata::default();

        if let Some(path) = unit.text_path.as_deref() {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| IngestError::Source {
                    modality: Modality::Text,
                    path: path.to_path_buf(),
                    source: e,
                })?;
            let raw = self
                .provider
                .embed_text(&text)
                .await
                .map_err(|e| IngestError::Embedding {
                    unit: unit.base_name.clone(),
                    modality: Modality::Text,
                    source: e,
                })?;
            vectors.insert(Modality::Text, ModalityVector::from_raw(Modality::Text, raw)?);
            payload.text = text;
        }

        if let Some(path) = unit.image_path.as_deref() {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| IngestError::Source {
                    modality: Modality::Image,
                    path: path.to_path_buf(),
                    source: e,
                })?;
            let raw = self
                .provider
                .embed_image(&bytes)
                .await
                .map_err(|e| IngestError::Embedding {
                    unit: unit.base_name.clone(),
                    modality: Modality::Image,
                    source: e,
                })?;
            vectors.insert(
                Modality::Image,
                ModalityVector::from_raw(Modality::Image, raw)?,
            );
            payload.image_path = path.display().to_string();
        }

        if let Some(path) = unit.metadata_path.as_deref() {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| IngestError::Source {
                    modality: Modality::Metadata,
                    path: path.to_path_buf(),
                    source: e,
                })?;
            let value: serde_json::Value =
                serde_json::from_str(&content).map_err(|e| IngestError::Metadata {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            // Embed the re-serialized (compact) form so formatting of the
            // source file does not change the vector.
            let json_str = value.to_string();
            let raw = self
                .provider
                .embed_text(&json_str)
                .await
                .map_err(|e| IngestError::Embedding {
                    unit: unit.base_name.clone(),
                    modality: Modality::Metadata,
                    source: e,
                })?;
            vectors.insert(
                Modality::Metadata,
                ModalityVector::from_raw(Modality::Metadata, raw)?,
            );
            payload.metadata = json_str;
        }

        Ok(Some(CombinedRecord::assemble(
            unit.base_name.clone(),
            vectors,
            payload,
        )))
    }
}
