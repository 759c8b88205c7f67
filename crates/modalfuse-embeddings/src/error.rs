//! Embedding error types.

use thiserror::Error;

/// Errors that can occur while obtaining embeddings from the service.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// API returned a non-success status or the transport failed
    #[error("API error: {0}")]
    Api(String),

    /// API rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client configuration error (missing key, bad URL, bad timeout)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (empty text, unreadable image bytes)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
