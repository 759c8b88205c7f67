//! End-to-end embed scenarios: directory scan through record assembly
//! and snapshot round-trip.

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use e2e_tests::StubProvider;
use modalfuse_ingest::{scan_units, EmbedPipeline, PipelineConfig};
use modalfuse_types::{Modality, Snapshot, COMBINED_DIMENSION};

fn pipeline() -> EmbedPipeline<StubProvider> {
    EmbedPipeline::new(Arc::new(StubProvider), PipelineConfig::default())
}

#[tokio::test]
async fn text_and_image_unit_without_json() {
    // doc1.txt ("hello world") and doc1.png only, no json
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc1.txt"), "hello world").unwrap();
    fs::write(dir.path().join("doc1.png"), b"png bytes").unwrap();

    let units = scan_units(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].base_name, "doc1");

    let (snapshot, stats) = pipeline().run(&units).await.unwrap();
    assert_eq!(stats.records_assembled, 1);

    let record = snapshot.get("doc1").unwrap();
    assert_eq!(record.dimension(), 3072);

    // text segment: truncated stub embedding
    assert!(record.vector[..1536].iter().all(|x| *x == 0.1));
    // image segment: stub image embedding
    assert!(record.vector[1536..2048].iter().all(|x| *x == 0.2));
    // metadata segment: zero vector for the absent modality
    assert!(record.vector[2048..].iter().all(|x| *x == 0.0));

    assert_eq!(record.metadata.text, "hello world");
    assert_eq!(
        record.metadata.image_path,
        dir.path().join("doc1.png").display().to_string()
    );
    assert_eq!(record.metadata.metadata, "{}");
}

#[tokio::test]
async fn full_unit_groups_all_three_modalities() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "text").unwrap();
    fs::write(dir.path().join("a.jpg"), b"jpg").unwrap();
    fs::write(dir.path().join("a.json"), r#"{"title": "a"}"#).unwrap();

    let units = scan_units(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    let unit = &units[0];
    assert_eq!(unit.base_name, "a");
    assert!(unit.has(Modality::Text));
    assert!(unit.has(Modality::Image));
    assert!(unit.has(Modality::Metadata));

    let (snapshot, _) = pipeline().run(&units).await.unwrap();
    let record = snapshot.get("a").unwrap();
    assert_eq!(record.dimension(), COMBINED_DIMENSION);
    // all three segments are real
    assert!(record.vector.iter().all(|x| *x != 0.0));
    assert_eq!(record.metadata.metadata, r#"{"title":"a"}"#);
}

#[tokio::test]
async fn distinct_base_names_never_collide() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c"] {
        fs::write(dir.path().join(format!("{name}.txt")), name).unwrap();
    }

    let (snapshot, _) = pipeline()
        .embed_directory(dir.path())
        .await
        .unwrap();

    let ids: Vec<&str> = snapshot.ids().collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn unsupported_extensions_yield_nothing_without_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), "x").unwrap();
    fs::write(dir.path().join("b.csv"), "y").unwrap();

    let (snapshot, stats) = pipeline().embed_directory(dir.path()).await.unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(stats.units_processed, 0);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn snapshot_round_trip_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc1.txt"), "hello world").unwrap();

    let (snapshot, _) = pipeline().embed_directory(dir.path()).await.unwrap();

    let out = tempfile::tempdir().unwrap();
    snapshot.save(out.path()).unwrap();
    let loaded = Snapshot::load(out.path()).unwrap();

    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.get("doc1").unwrap().dimension(), 3072);
}
