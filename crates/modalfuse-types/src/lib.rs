//! # modalfuse-types
//!
//! Shared domain types for the modalfuse batch embedder.
//!
//! This crate defines the core data structures used throughout the system:
//! - Content units: same-named files grouped across modalities
//! - Modality vectors: fixed-dimension per-modality embeddings
//! - Combined records: the fused vector plus uniform metadata payload
//! - Snapshots: the paired on-disk artifact between embed and upload
//! - Settings: layered configuration

pub mod config;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod unit;

pub use config::{EmbeddingSettings, Settings, SinkSettings};
pub use error::{DimensionError, ModalError};
pub use record::{CombinedRecord, ModalityVector, RecordMetadata, COMBINED_DIMENSION};
pub use snapshot::{Snapshot, EMBEDDINGS_FILE, METADATA_FILE};
pub use unit::{ContentUnit, Modality};
