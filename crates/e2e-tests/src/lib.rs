//! Shared fixtures for modalfuse end-to-end tests.

use async_trait::async_trait;

use modalfuse_embeddings::{EmbeddingError, EmbeddingProvider};

/// Deterministic embedding provider for tests.
///
/// Text embeddings come back longer than the fixed text dimension (raw
/// models routinely over-deliver, and this exercises truncation); image
/// embeddings come back at exactly 512. Values encode the modality so
/// tests can tell segments apart: text fills with 0.1, image with 0.2.
pub struct StubProvider;

#[async_trait]
impl EmbeddingProvider for StubProvider {
    async fn embed_text(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.1; 3072])
    }

    async fn embed_image(&self, _bytes: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.2; 512])
    }
}
