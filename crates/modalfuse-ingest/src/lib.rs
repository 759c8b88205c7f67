//! # modalfuse-ingest
//!
//! Turns a flat directory of same-named files into assembled combined
//! records: scan and group ([`scan_units`]), then embed and assemble
//! ([`EmbedPipeline`]) into a reloadable [`modalfuse_types::Snapshot`].

pub mod error;
pub mod grouper;
pub mod pipeline;

pub use error::IngestError;
pub use grouper::scan_units;
pub use pipeline::{EmbedPipeline, PipelineConfig, PipelineStats};
