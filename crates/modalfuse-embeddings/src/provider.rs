//! Embedding provider trait.
//!
//! Defines the interface for generating per-modality vector embeddings.
//! Raw vectors come back at whatever length the model produces; the
//! caller normalizes them to the fixed modality dimensions.

use async_trait::async_trait;

use crate::error::EmbeddingError;

/// Trait for per-modality embedding services.
///
/// Implementations must be thread-safe (Send + Sync): the pipeline embeds
/// multiple content units concurrently against one provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate a raw embedding for a UTF-8 text.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Generate a raw embedding for raw image bytes.
    async fn embed_image(&self, bytes: &[u8]) -> Result<Vec<f32>, EmbeddingError>;
}
