//! # modalfuse-sink
//!
//! Persistence sink for assembled records: the [`VectorSink`] trait,
//! a batching [`Uploader`] with retry-once semantics, the HTTP data-plane
//! implementation ([`HttpSink`]) and an in-memory sink for tests.

pub mod error;
pub mod http;
pub mod sink;
pub mod uploader;

pub use error::SinkError;
pub use http::{HttpSink, HttpSinkConfig};
pub use sink::{MemorySink, MetadataValue, SinkMetadata, UpsertVector, VectorSink};
pub use uploader::{Uploader, UploaderConfig, UploadStats};
