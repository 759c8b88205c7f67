//! Configuration loading for modalfuse.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! Config file lives at ~/.config/modalfuse/config.toml; environment
//! variables use the MODALFUSE_ prefix. API keys are never written to the
//! config file by tooling; they are usually supplied via environment.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ModalError;

/// Embedding service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// API base URL (OpenAI-compatible)
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Text embedding model name
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Image embedding model name
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// API key (falls back to OPENAI_API_KEY env var when unset)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries per embedding request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Bound on concurrently processed content units
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_embedding_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_text_model() -> String {
    "text-embedding-3-large".to_string()
}

fn default_image_model() -> String {
    "clip-vit-base-patch32".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_concurrency() -> usize {
    4
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            concurrency: default_concurrency(),
        }
    }
}

/// Vector index (persistence sink) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkSettings {
    /// Data-plane URL of the target index
    #[serde(default)]
    pub index_url: Option<String>,

    /// API key (falls back to PINECONE_API_KEY env var when unset)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Records per upsert batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_batch_size() -> usize {
    100
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            index_url: None,
            api_key: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Main application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Snapshot directory (combined vectors + content metadata)
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Embedding service settings
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Persistence sink settings
    #[serde(default)]
    pub sink: SinkSettings,
}

fn default_snapshot_dir() -> String {
    "./embeddings".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            log_level: default_log_level(),
            embedding: EmbeddingSettings::default(),
            sink: SinkSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/modalfuse/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (MODALFUSE_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, ModalError> {
        let config_dir = ProjectDirs::from("", "", "modalfuse")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            // 1. Built-in defaults
            .set_default("snapshot_dir", default_snapshot_dir())
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.base_url", default_embedding_base_url())
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.text_model", default_text_model())
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.image_model", default_image_model())
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.timeout_secs", default_timeout_secs() as i64)
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.max_retries", default_max_retries() as i64)
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("embedding.concurrency", default_concurrency() as i64)
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("sink.batch_size", default_batch_size() as i64)
            .map_err(|e| ModalError::Config(e.to_string()))?
            .set_default("sink.timeout_secs", default_timeout_secs() as i64)
            .map_err(|e| ModalError::Config(e.to_string()))?
            // 2. Default config file (~/.config/modalfuse/config.toml)
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        // 3. CLI-specified config file (higher precedence than default)
        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // 4. Environment variables (highest precedence before CLI flags)
        // Format: MODALFUSE_SNAPSHOT_DIR, MODALFUSE_EMBEDDING_BASE_URL, etc.
        builder = builder.add_source(
            Environment::with_prefix("MODALFUSE")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ModalError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ModalError::Config(e.to_string()))
    }

    /// Snapshot directory as a path.
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.snapshot_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.snapshot_dir, "./embeddings");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.embedding.text_model, "text-embedding-3-large");
        assert_eq!(settings.sink.batch_size, 100);
    }

    #[test]
    fn test_embedding_defaults() {
        let embedding = EmbeddingSettings::default();
        assert!(embedding.base_url.contains("openai"));
        assert_eq!(embedding.timeout_secs, 60);
        assert_eq!(embedding.max_retries, 3);
        assert_eq!(embedding.concurrency, 4);
        assert!(embedding.api_key.is_none());
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.sink.batch_size, 100);
        assert_eq!(settings.embedding.concurrency, 4);
    }

    #[test]
    fn test_snapshot_path() {
        let settings = Settings::default();
        assert_eq!(settings.snapshot_path(), PathBuf::from("./embeddings"));
    }
}
