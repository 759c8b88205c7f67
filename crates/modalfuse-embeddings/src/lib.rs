//! # modalfuse-embeddings
//!
//! Embedding generation for modalfuse via a remote OpenAI-compatible API.
//!
//! The [`EmbeddingProvider`] trait is the seam between the embed pipeline
//! and whatever service actually produces vectors; [`ApiEmbedder`] is the
//! HTTP implementation with explicit timeouts and bounded retries.

pub mod api;
pub mod error;
pub mod provider;

pub use api::{ApiEmbedder, ApiEmbedderConfig};
pub use error::EmbeddingError;
pub use provider::EmbeddingProvider;
