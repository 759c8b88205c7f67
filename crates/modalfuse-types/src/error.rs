//! Error types shared across the modalfuse workspace.

use thiserror::Error;

use crate::unit::Modality;

/// Unified error type for core operations (config, snapshot I/O).
#[derive(Debug, Error)]
pub enum ModalError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A raw embedding came back shorter than its modality's fixed dimension.
///
/// Too-short embeddings are never padded: padding a real embedding would
/// corrupt similarity semantics. The affected unit is skipped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{modality} embedding too short: expected at least {expected} values, got {actual}")]
pub struct DimensionError {
    /// Modality whose embedding was too short
    pub modality: Modality,
    /// The modality's fixed dimension
    pub expected: usize,
    /// Length actually returned by the embedding model
    pub actual: usize,
}
