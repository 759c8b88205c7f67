//! Modality vectors and combined records.
//!
//! A [`ModalityVector`] is a per-modality embedding normalized to its fixed
//! dimension. A [`CombinedRecord`] concatenates the three modality vectors
//! in fixed order (text, image, metadata) so every record has the same
//! total dimension regardless of which modalities a unit actually has,
//! enabling a single fixed-dimension index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DimensionError;
use crate::unit::Modality;

/// Total dimension of a combined vector: 1536 + 512 + 1024.
pub const COMBINED_DIMENSION: usize = Modality::Text.dimension()
    + Modality::Image.dimension()
    + Modality::Metadata.dimension();

/// A fixed-dimension embedding for one modality.
///
/// Invariant: `values.len() == modality.dimension()` always. The only ways
/// to construct one are [`ModalityVector::from_raw`] (truncates longer raw
/// embeddings, rejects shorter ones) and [`ModalityVector::zeros`] (the
/// explicit substitute for an absent modality).
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityVector {
    modality: Modality,
    values: Vec<f32>,
}

impl ModalityVector {
    /// Build from a raw model embedding.
    ///
    /// Truncates to the modality's fixed dimension when the raw vector is
    /// longer. Fails with [`DimensionError`] when it is shorter; a real
    /// embedding is never padded.
    pub fn from_raw(modality: Modality, mut raw: Vec<f32>) -> Result<Self, DimensionError> {
        let expected = modality.dimension();
        if raw.len() < expected {
            return Err(DimensionError {
                modality,
                expected,
                actual: raw.len(),
            });
        }
        raw.truncate(expected);
        Ok(Self {
            modality,
            values: raw,
        })
    }

    /// Zero vector of the modality's full dimension, standing in for an
    /// absent modality so the combined dimension stays constant.
    pub fn zeros(modality: Modality) -> Self {
        Self {
            modality,
            values: vec![0.0; modality.dimension()],
        }
    }

    /// The modality this vector belongs to.
    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// The vector values, always `modality().dimension()` long.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Vector length; equals the modality's fixed dimension.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// Uniform metadata payload attached to every record.
///
/// All fields are always present so every record in the index has the same
/// metadata schema: absent text/image become empty strings, absent
/// metadata becomes the empty JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Raw text content, empty string if the unit had no text source.
    pub text: String,
    /// Image source path, empty string if the unit had no image source.
    pub image_path: String,
    /// Original metadata object as a JSON string, `"{}"` if absent.
    pub metadata: String,
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self {
            text: String::new(),
            image_path: String::new(),
            metadata: "{}".to_string(),
        }
    }
}

/// One fused record: the combined vector plus its metadata payload.
///
/// Built once per content unit, written once to the persistence sink,
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    /// Record id, equal to the content unit's base name.
    pub id: String,
    /// Concatenated vector, always [`COMBINED_DIMENSION`] long.
    pub vector: Vec<f32>,
    /// Uniform metadata payload.
    pub metadata: RecordMetadata,
}

impl CombinedRecord {
    /// Assemble the combined vector from per-modality vectors.
    ///
    /// Modalities missing from `vectors` contribute a zero segment of
    /// their full dimension. Concatenation order is fixed: text, image,
    /// metadata.
    pub fn assemble(
        id: impl Into<String>,
        mut vectors: HashMap<Modality, ModalityVector>,
        metadata: RecordMetadata,
    ) -> Self {
        let mut combined = Vec::with_capacity(COMBINED_DIMENSION);
        for modality in Modality::ALL {
            match vectors.remove(&modality) {
                Some(v) => combined.extend_from_slice(v.values()),
                None => combined.extend(std::iter::repeat(0.0).take(modality.dimension())),
            }
        }
        Self {
            id: id.into(),
            vector: combined,
            metadata,
        }
    }

    /// Total vector dimension; equals [`COMBINED_DIMENSION`].
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32).collect()
    }

    #[test]
    fn test_combined_dimension() {
        assert_eq!(COMBINED_DIMENSION, 3072);
    }

    #[test]
    fn test_from_raw_truncates_longer() {
        let v = ModalityVector::from_raw(Modality::Text, raw(3072)).unwrap();
        assert_eq!(v.dimension(), 1536);
        assert_eq!(v.values()[1535], 1535.0);
    }

    #[test]
    fn test_from_raw_exact_length() {
        let v = ModalityVector::from_raw(Modality::Image, raw(512)).unwrap();
        assert_eq!(v.dimension(), 512);
    }

    #[test]
    fn test_from_raw_rejects_shorter() {
        let err = ModalityVector::from_raw(Modality::Metadata, raw(1000)).unwrap_err();
        assert_eq!(err.modality, Modality::Metadata);
        assert_eq!(err.expected, 1024);
        assert_eq!(err.actual, 1000);
    }

    #[test]
    fn test_truncation_idempotent() {
        let once = ModalityVector::from_raw(Modality::Text, raw(2000)).unwrap();
        let twice =
            ModalityVector::from_raw(Modality::Text, once.values().to_vec()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zeros() {
        let v = ModalityVector::zeros(Modality::Image);
        assert_eq!(v.dimension(), 512);
        assert!(v.values().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_assemble_all_modalities() {
        let mut vectors = HashMap::new();
        vectors.insert(
            Modality::Text,
            ModalityVector::from_raw(Modality::Text, vec![1.0; 1536]).unwrap(),
        );
        vectors.insert(
            Modality::Image,
            ModalityVector::from_raw(Modality::Image, vec![2.0; 512]).unwrap(),
        );
        vectors.insert(
            Modality::Metadata,
            ModalityVector::from_raw(Modality::Metadata, vec![3.0; 1024]).unwrap(),
        );

        let record = CombinedRecord::assemble("a", vectors, RecordMetadata::default());
        assert_eq!(record.dimension(), COMBINED_DIMENSION);
        assert_eq!(record.vector[0], 1.0);
        assert_eq!(record.vector[1536], 2.0);
        assert_eq!(record.vector[1536 + 512], 3.0);
    }

    #[test]
    fn test_assemble_missing_modality_zero_segment() {
        let mut vectors = HashMap::new();
        vectors.insert(
            Modality::Text,
            ModalityVector::from_raw(Modality::Text, vec![1.0; 1536]).unwrap(),
        );
        vectors.insert(
            Modality::Image,
            ModalityVector::from_raw(Modality::Image, vec![2.0; 512]).unwrap(),
        );

        let record = CombinedRecord::assemble("doc1", vectors, RecordMetadata::default());
        assert_eq!(record.dimension(), 3072);
        // metadata segment is all zeros
        assert!(record.vector[1536 + 512..].iter().all(|x| *x == 0.0));
        // real segments are untouched
        assert!(record.vector[..1536].iter().all(|x| *x == 1.0));
        assert!(record.vector[1536..1536 + 512].iter().all(|x| *x == 2.0));
    }

    #[test]
    fn test_assemble_empty_unit_is_all_zeros() {
        let record =
            CombinedRecord::assemble("empty", HashMap::new(), RecordMetadata::default());
        assert_eq!(record.dimension(), COMBINED_DIMENSION);
        assert!(record.vector.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_default_metadata_payload() {
        let meta = RecordMetadata::default();
        assert_eq!(meta.text, "");
        assert_eq!(meta.image_path, "");
        assert_eq!(meta.metadata, "{}");
    }
}
