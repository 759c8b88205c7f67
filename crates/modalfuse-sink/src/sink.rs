//! Vector sink trait and wire types.
//!
//! The sink consumes (id, vector, metadata) triples where metadata is a
//! flat map of string keys to string/number/bool values. Nested structures
//! are pre-serialized to JSON strings before they get here.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use modalfuse_types::CombinedRecord;

use crate::error::SinkError;

/// A flat metadata value: string, number or bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// String value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Text(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Number(v)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

/// Flat metadata map attached to an upserted vector.
pub type SinkMetadata = BTreeMap<String, MetadataValue>;

/// One vector as the sink consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertVector {
    /// Record id, unique per record
    pub id: String,
    /// Flat float vector of the index's fixed dimension
    pub values: Vec<f32>,
    /// Flat metadata map
    pub metadata: SinkMetadata,
}

impl From<CombinedRecord> for UpsertVector {
    fn from(record: CombinedRecord) -> Self {
        let mut metadata = SinkMetadata::new();
        metadata.insert("content_id".to_string(), record.id.clone().into());
        metadata.insert("text".to_string(), record.metadata.text.into());
        metadata.insert("image_path".to_string(), record.metadata.image_path.into());
        metadata.insert("metadata".to_string(), record.metadata.metadata.into());

        Self {
            id: record.id,
            values: record.vector,
            metadata,
        }
    }
}

/// Trait for persistence sinks.
///
/// One call upserts one batch; the sink is keyed by id, so re-sending a
/// batch after a partial failure is safe (records are overwritten, never
/// duplicated).
#[async_trait]
pub trait VectorSink: Send + Sync {
    /// Upsert a batch of vectors.
    async fn upsert(&self, vectors: &[UpsertVector]) -> Result<(), SinkError>;
}

/// In-memory sink used by tests and dry runs.
#[derive(Default)]
pub struct MemorySink {
    stored: Mutex<HashMap<String, UpsertVector>>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.stored.lock().unwrap().len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored record by id.
    pub fn get(&self, id: &str) -> Option<UpsertVector> {
        self.stored.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl VectorSink for MemorySink {
    async fn upsert(&self, vectors: &[UpsertVector]) -> Result<(), SinkError> {
        let mut stored = self.stored.lock().unwrap();
        for vector in vectors {
            stored.insert(vector.id.clone(), vector.clone());
        }
        Ok(())
    }
}
