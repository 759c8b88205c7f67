//! File grouper: one scan pass over a flat directory.
//!
//! Every regular file is assigned to exactly one content unit keyed by its
//! file stem. Extension classes: `.txt` -> text, `.jpg`/`.jpeg`/`.png` ->
//! image, `.json` -> metadata (case-insensitive). Unsupported extensions
//! are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use modalfuse_types::{ContentUnit, Modality};

use crate::error::IngestError;

/// Scan a directory and group its files into content units.
///
/// Fails with [`IngestError::NotFound`] when the directory does not
/// exist. Entries are sorted by file name before grouping, so when a base
/// name carries two files of the same modality class (say `a.jpg` and
/// `a.png`) the lexicographically last one wins — a deterministic rule,
/// independent of readdir order. Units come back sorted by base name.
pub fn scan_units(dir: &Path) -> Result<Vec<ContentUnit>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::NotFound(dir.to_path_buf()));
    }

    let mut names: Vec<(String, std::path::PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push((name.to_string(), path));
        }
    }
    names.sort_by(|a, b| a.0.cmp(&b.0));

    let mut units: BTreeMap<String, ContentUnit> = BTreeMap::new();
    for (name, path) in names {
        let modality = match path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Modality::from_extension)
        {
            Some(m) => m,
            None => {
                debug!(file = %name, "Unsupported extension, skipping");
                continue;
            }
        };

        let base_name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => {
                debug!(file = %name, "No usable file stem, skipping");
                continue;
            }
        };

        units
            .entry(base_name.clone())
            .or_insert_with(|| ContentUnit::new(base_name))
            .set_path(modality, path);
    }

    let units: Vec<ContentUnit> = units.into_values().collect();
    info!(
        dir = %dir.display(),
        units = units.len(),
        "Directory scan complete"
    );
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let err = scan_units(Path::new("/nonexistent/input")).unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
    }

    #[test]
    fn test_three_files_one_unit() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "a.json");

        let units = scan_units(dir.path()).unwrap();
        assert_eq!(units.len(), 1);

        let unit = &units[0];
        assert_eq!(unit.base_name, "a");
        assert!(unit.has(Modality::Text));
        assert!(unit.has(Modality::Image));
        assert!(unit.has(Modality::Metadata));
    }

    #[test]
    fn test_units_sorted_by_base_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta.txt");
        touch(dir.path(), "alpha.txt");
        touch(dir.path(), "mid.json");

        let units = scan_units(dir.path()).unwrap();
        let names: Vec<&str> = units.iter().map(|u| u.base_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_duplicate_image_class_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "a.png");

        let units = scan_units(dir.path()).unwrap();
        assert_eq!(units.len(), 1);
        // sorted scan: a.jpg then a.png, so a.png wins
        assert_eq!(
            units[0].image_path.as_deref(),
            Some(dir.path().join("a.png").as_path())
        );
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.TXT");
        touch(dir.path(), "b.JPEG");

        let units = scan_units(dir.path()).unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].has(Modality::Text));
        assert!(units[0].has(Modality::Image));
    }

    #[test]
    fn test_unsupported_extensions_yield_no_units() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.pdf");
        touch(dir.path(), "b.csv");
        touch(dir.path(), "noext");

        let units = scan_units(dir.path()).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn test_mixed_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = File::create(dir.path().join("doc1.txt")).unwrap();
        f.write_all(b"hello world").unwrap();
        touch(dir.path(), "doc1.png");
        touch(dir.path(), "doc2.json");
        touch(dir.path(), "ignored.tmp");

        let units = scan_units(dir.path()).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].base_name, "doc1");
        assert_eq!(units[0].modalities(), vec![Modality::Text, Modality::Image]);
        assert_eq!(units[1].base_name, "doc2");
        assert_eq!(units[1].modalities(), vec![Modality::Metadata]);
    }
}
