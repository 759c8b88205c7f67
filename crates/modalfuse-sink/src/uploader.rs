//! Batching uploader with whole-batch retry-once semantics.
//!
//! Records are grouped into fixed-size batches to bound request size. A
//! failed batch is retried once as a whole; a second failure is logged and
//! the run continues with the next batch. Data is never dropped silently:
//! every permanently failed batch shows up in the stats and the log.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use modalfuse_types::Snapshot;

use crate::sink::{UpsertVector, VectorSink};

/// Uploader configuration.
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Records per upsert batch.
    pub batch_size: usize,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Statistics from an upload run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadStats {
    /// Batches successfully upserted
    pub batches_sent: usize,
    /// Vectors successfully upserted
    pub vectors_uploaded: usize,
    /// Batches that failed twice and were dropped
    pub batches_failed: usize,
}

/// Batching uploader over a generic sink.
pub struct Uploader<S: VectorSink> {
    sink: Arc<S>,
    config: UploaderConfig,
}

impl<S: VectorSink> Uploader<S> {
    /// Create a new uploader.
    pub fn new(sink: Arc<S>, config: UploaderConfig) -> Self {
        Self { sink, config }
    }

    /// Upload all records of a snapshot.
    pub async fn upload_snapshot(&self, snapshot: &Snapshot) -> UploadStats {
        let vectors: Vec<UpsertVector> = snapshot
            .records()
            .into_iter()
            .map(UpsertVector::from)
            .collect();
        self.upload(&vectors).await
    }

    /// Upload a set of vectors in batches.
    pub async fn upload(&self, vectors: &[UpsertVector]) -> UploadStats {
        let mut stats = UploadStats::default();

        if vectors.is_empty() {
            debug!("No vectors to upload");
            return stats;
        }

        let batch_size = self.config.batch_size.max(1);
        info!(
            vectors = vectors.len(),
            batch_size = batch_size,
            "Uploading vectors"
        );

        for (batch_index, batch) in vectors.chunks(batch_size).enumerate() {
            match self.sink.upsert(batch).await {
                Ok(()) => {
                    debug!(batch = batch_index, size = batch.len(), "Batch upserted");
                    stats.batches_sent += 1;
                    stats.vectors_uploaded += batch.len();
                }
                Err(e) => {
                    warn!(batch = batch_index, error = %e, "Batch failed, retrying once");
                    match self.sink.upsert(batch).await {
                        Ok(()) => {
                            stats.batches_sent += 1;
                            stats.vectors_uploaded += batch.len();
                        }
                        Err(e) => {
                            error!(
                                batch = batch_index,
                                size = batch.len(),
                                error = %e,
                                "Batch failed after retry, continuing with next batch"
                            );
                            stats.batches_failed += 1;
                        }
                    }
                }
            }
        }

        info!(
            sent = stats.batches_sent,
            uploaded = stats.vectors_uploaded,
            failed = stats.batches_failed,
            "Upload complete"
        );
        stats
    }
}
