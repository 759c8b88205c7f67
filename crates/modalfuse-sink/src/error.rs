//! Sink error types.

use thiserror::Error;

/// Errors that can occur while writing to the vector index.
#[derive(Debug, Error)]
pub enum SinkError {
    /// API returned a non-success status or the transport failed
    #[error("API error: {0}")]
    Api(String),

    /// API rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Client configuration error (missing index URL or key)
    #[error("Configuration error: {0}")]
    Config(String),
}
