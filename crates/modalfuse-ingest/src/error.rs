//! Ingest error types.

use std::path::PathBuf;

use thiserror::Error;

use modalfuse_embeddings::EmbeddingError;
use modalfuse_types::{DimensionError, Modality};

/// Errors from scanning and embedding content units.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory does not exist (fatal for the run)
    #[error("Input directory not found: {0}")]
    NotFound(PathBuf),

    /// A unit source file could not be read
    #[error("Failed to read {modality} source {path}: {source}")]
    Source {
        /// Modality of the unreadable source
        modality: Modality,
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A metadata file did not contain valid JSON
    #[error("Invalid metadata JSON in {path}: {source}")]
    Metadata {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The embedding service failed for one modality of a unit
    #[error("Embedding failed for {modality} of unit {unit}: {source}")]
    Embedding {
        /// Unit whose embedding failed
        unit: String,
        /// Modality that failed
        modality: Modality,
        /// Underlying service error
        #[source]
        source: EmbeddingError,
    },

    /// A raw embedding was shorter than its fixed modality dimension
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// Directory enumeration failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
