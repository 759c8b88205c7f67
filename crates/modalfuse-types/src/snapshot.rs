//! Paired on-disk snapshot: combined vectors plus content metadata.
//!
//! The embed step writes the snapshot; the upload step reloads it. Two
//! files live side by side in the snapshot directory:
//! - `combined_embeddings.json` — id -> combined vector (3072 floats)
//! - `content_metadata.json` — id -> { text, image_path, metadata }

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModalError;
use crate::record::{CombinedRecord, RecordMetadata};

/// File name of the combined-vector store inside a snapshot directory.
pub const EMBEDDINGS_FILE: &str = "combined_embeddings.json";

/// File name of the content metadata document inside a snapshot directory.
pub const METADATA_FILE: &str = "content_metadata.json";

/// In-memory snapshot of assembled records, keyed by content-unit id.
///
/// `BTreeMap` keeps the on-disk JSON deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    vectors: BTreeMap<String, Vec<f32>>,
    metadata: BTreeMap<String, RecordMetadata>,
}

impl Snapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an assembled record. A record with the same id replaces the
    /// previous one (ids are unique per scan, so this only matters when a
    /// snapshot is re-embedded in place).
    pub fn insert(&mut self, record: CombinedRecord) {
        self.metadata.insert(record.id.clone(), record.metadata);
        self.vectors.insert(record.id, record.vector);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True when the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Record ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(|s| s.as_str())
    }

    /// Reconstruct a record by id.
    pub fn get(&self, id: &str) -> Option<CombinedRecord> {
        let vector = self.vectors.get(id)?.clone();
        let metadata = self.metadata.get(id).cloned().unwrap_or_default();
        Some(CombinedRecord {
            id: id.to_string(),
            vector,
            metadata,
        })
    }

    /// All records, in id order.
    pub fn records(&self) -> Vec<CombinedRecord> {
        self.vectors
            .iter()
            .map(|(id, vector)| CombinedRecord {
                id: id.clone(),
                vector: vector.clone(),
                metadata: self.metadata.get(id).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Write both snapshot files, creating the directory if needed.
    pub fn save(&self, dir: &Path) -> Result<(), ModalError> {
        fs::create_dir_all(dir)?;

        let embeddings_path = dir.join(EMBEDDINGS_FILE);
        let metadata_path = dir.join(METADATA_FILE);

        fs::write(&embeddings_path, serde_json::to_vec(&self.vectors)?)?;
        fs::write(&metadata_path, serde_json::to_vec_pretty(&self.metadata)?)?;

        info!(
            records = self.len(),
            dir = %dir.display(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Load a snapshot from a directory written by [`Snapshot::save`].
    pub fn load(dir: &Path) -> Result<Self, ModalError> {
        let embeddings_path = dir.join(EMBEDDINGS_FILE);
        let metadata_path = dir.join(METADATA_FILE);

        if !embeddings_path.is_file() || !metadata_path.is_file() {
            return Err(ModalError::NotFound(format!(
                "snapshot not found in {}",
                dir.display()
            )));
        }

        let vectors: BTreeMap<String, Vec<f32>> =
            serde_json::from_slice(&fs::read(&embeddings_path)?)?;
        let metadata: BTreeMap<String, RecordMetadata> =
            serde_json::from_slice(&fs::read(&metadata_path)?)?;

        Ok(Self { vectors, metadata })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::COMBINED_DIMENSION;

    fn record(id: &str, fill: f32) -> CombinedRecord {
        CombinedRecord {
            id: id.to_string(),
            vector: vec![fill; COMBINED_DIMENSION],
            metadata: RecordMetadata {
                text: format!("{id} text"),
                image_path: String::new(),
                metadata: "{}".to_string(),
            },
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(record("a", 1.0));
        snapshot.insert(record("b", 2.0));

        assert_eq!(snapshot.len(), 2);
        let a = snapshot.get("a").unwrap();
        assert_eq!(a.vector[0], 1.0);
        assert_eq!(a.metadata.text, "a text");
        assert!(snapshot.get("missing").is_none());
    }

    #[test]
    fn test_records_in_id_order() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(record("b", 2.0));
        snapshot.insert(record("a", 1.0));

        let ids: Vec<String> = snapshot.records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.insert(record("doc1", 0.5));

        snapshot.save(dir.path()).unwrap();
        let loaded = Snapshot::load(dir.path()).unwrap();

        assert_eq!(loaded, snapshot);
        assert!(dir.path().join(EMBEDDINGS_FILE).is_file());
        assert!(dir.path().join(METADATA_FILE).is_file());
    }

    #[test]
    fn test_load_missing_directory() {
        let err = Snapshot::load(Path::new("/nonexistent/snapshot")).unwrap_err();
        assert!(matches!(err, ModalError::NotFound(_)));
    }

    #[test]
    fn test_load_missing_metadata_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EMBEDDINGS_FILE), "{}").unwrap();

        let err = Snapshot::load(dir.path()).unwrap_err();
        assert!(matches!(err, ModalError::NotFound(_)));
    }
}
