//! HTTP sink against a Pinecone-style index data plane.
//!
//! Upserts go to `POST {index_url}/vectors/upsert` with the API key in the
//! `Api-Key` header. Retry policy lives in the uploader, not here: this
//! client surfaces one attempt's outcome.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use modalfuse_types::SinkSettings;

use crate::error::SinkError;
use crate::sink::{UpsertVector, VectorSink};

/// Configuration for the HTTP sink.
#[derive(Debug, Clone)]
pub struct HttpSinkConfig {
    /// Data-plane URL of the target index
    pub index_url: String,

    /// API key
    pub api_key: SecretString,

    /// Request timeout
    pub timeout: Duration,
}

impl HttpSinkConfig {
    /// Build from loaded settings. The API key comes from settings or,
    /// failing that, the PINECONE_API_KEY environment variable.
    pub fn from_settings(settings: &SinkSettings) -> Result<Self, SinkError> {
        let index_url = settings
            .index_url
            .clone()
            .ok_or_else(|| SinkError::Config("sink.index_url is not set".to_string()))?;
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("PINECONE_API_KEY").ok())
            .ok_or_else(|| {
                SinkError::Config(
                    "no sink API key: set sink.api_key or PINECONE_API_KEY".to_string(),
                )
            })?;

        Ok(Self {
            index_url,
            api_key: SecretString::from(api_key),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [UpsertVector],
}

/// HTTP vector sink.
pub struct HttpSink {
    client: Client,
    config: HttpSinkConfig,
}

impl HttpSink {
    /// Create a new HTTP sink.
    pub fn new(config: HttpSinkConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SinkError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl VectorSink for HttpSink {
    async fn upsert(&self, vectors: &[UpsertVector]) -> Result<(), SinkError> {
        let url = format!(
            "{}/vectors/upsert",
            self.config.index_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Api-Key", self.config.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&UpsertRequest { vectors })
            .send()
            .await
            .map_err(|e| SinkError::Api(e.to_string()))?;

        if response.status() == 429 {
            return Err(SinkError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Api(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }
}
