//! Content units and modality classes.
//!
//! A content unit groups files sharing a base name (extension stripped)
//! across up to three modalities. Units are built once by a directory scan
//! and are immutable afterward.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The three modality classes a content unit can carry.
///
/// The discriminant order (text, image, metadata) is also the concatenation
/// order of the combined vector and must never vary across records in the
/// same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// UTF-8 text content (`.txt`)
    Text,
    /// Image content (`.jpg`, `.jpeg`, `.png`)
    Image,
    /// Structured metadata (`.json`)
    Metadata,
}

impl Modality {
    /// All modalities in concatenation order.
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Image, Modality::Metadata];

    /// Fixed embedding dimension for this modality.
    ///
    /// The values are set by the embedding models the index was built for
    /// (text-embedding-3-large truncated to 1536, CLIP ViT-B/32 at 512,
    /// metadata text truncated to 1024), not derived at runtime.
    pub const fn dimension(&self) -> usize {
        match self {
            Modality::Text => 1536,
            Modality::Image => 512,
            Modality::Metadata => 1024,
        }
    }

    /// Stable lowercase name, used in logs and metadata payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Metadata => "metadata",
        }
    }

    /// Classify a file extension (without the dot, any case) into a
    /// modality class. Returns `None` for unsupported extensions.
    pub fn from_extension(ext: &str) -> Option<Modality> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Modality::Text),
            "jpg" | "jpeg" | "png" => Some(Modality::Image),
            "json" => Some(Modality::Metadata),
            _ => None,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical content unit: same-named files across modalities.
///
/// At most one path per modality class. Which file wins when a base name
/// has two files of the same class is decided by the grouper (sorted scan,
/// last seen wins), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUnit {
    /// Base name shared by the unit's files, unique within a scan.
    /// Doubles as the record id.
    pub base_name: String,
    /// Path to the `.txt` source, if any.
    pub text_path: Option<PathBuf>,
    /// Path to the image source, if any.
    pub image_path: Option<PathBuf>,
    /// Path to the `.json` metadata source, if any.
    pub metadata_path: Option<PathBuf>,
}

impl ContentUnit {
    /// Create an empty unit for a base name.
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            text_path: None,
            image_path: None,
            metadata_path: None,
        }
    }

    /// Path for a modality class, if the unit has one.
    pub fn path_for(&self, modality: Modality) -> Option<&Path> {
        match modality {
            Modality::Text => self.text_path.as_deref(),
            Modality::Image => self.image_path.as_deref(),
            Modality::Metadata => self.metadata_path.as_deref(),
        }
    }

    /// Assign the path for a modality class, replacing any previous one.
    pub fn set_path(&mut self, modality: Modality, path: PathBuf) {
        match modality {
            Modality::Text => self.text_path = Some(path),
            Modality::Image => self.image_path = Some(path),
            Modality::Metadata => self.metadata_path = Some(path),
        }
    }

    /// Whether the unit has a source for the given modality.
    pub fn has(&self, modality: Modality) -> bool {
        self.path_for(modality).is_some()
    }

    /// Modalities present in this unit, in concatenation order.
    pub fn modalities(&self) -> Vec<Modality> {
        Modality::ALL
            .into_iter()
            .filter(|m| self.has(*m))
            .collect()
    }

    /// True when no modality has a source.
    pub fn is_empty(&self) -> bool {
        self.modalities().is_empty()
    }
}
