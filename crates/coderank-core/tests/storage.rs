use chrono::{Duration, Utc};
use coderank_core::catalog::Catalog;
use coderank_core::mock::mock_models;
use coderank_core::model::{enrich, EnrichedModel, SCHEMA_VERSION};
use coderank_core::storage::Store;

fn sample_models() -> Vec<EnrichedModel> {
    let catalog = Catalog::bundled().unwrap();
    enrich(&mock_models(), &catalog, Utc::now())
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("nested").join("models.json"));
    let models = sample_models();

    let saved = store.save(&models, "https://lmarena.ai/leaderboard").unwrap();
    assert_eq!(saved.schema_version, SCHEMA_VERSION);

    let loaded = store.load().unwrap().expect("bundle should be readable");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.models, models);
    assert_eq!(loaded.source_label, "https://lmarena.ai/leaderboard");
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("models.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn corrupt_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.json");
    std::fs::write(&path, "{ this is not json").unwrap();
    assert!(Store::new(&path).load().unwrap().is_none());
}

#[test]
fn missing_models_array_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.json");
    let json = format!(
        r#"{{"fetchedAt":"2025-01-01T00:00:00Z","sourceLabel":"mock","schemaVersion":"{SCHEMA_VERSION}"}}"#
    );
    std::fs::write(&path, json).unwrap();
    assert!(Store::new(&path).load().unwrap().is_none());
}

#[test]
fn other_schema_version_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("models.json"));
    store.save(&sample_models(), "mock").unwrap();

    let text = std::fs::read_to_string(store.path()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
    value["schemaVersion"] = "0.9.0".into();
    std::fs::write(store.path(), value.to_string()).unwrap();

    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_replaces_whole_bundle_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("models.json"));
    let models = sample_models();

    store.save(&models, "mock").unwrap();
    store.save(&models[..3], "second").unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.models.len(), 3);
    assert_eq!(loaded.source_label, "second");

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1, "temp files left behind");
}

#[test]
fn staleness() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("models.json"));
    assert!(store.is_stale(Duration::hours(24)).unwrap());

    store.save(&sample_models(), "mock").unwrap();
    assert!(!store.is_stale(Duration::hours(24)).unwrap());
    assert!(store.is_stale(Duration::zero()).unwrap());
}

#[test]
fn stored_json_uses_dashboard_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("models.json"));
    store.save(&sample_models(), "mock").unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert!(value["fetchedAt"].is_string());
    assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
    let first = &value["models"][0];
    assert_eq!(first["rank"], 1);
    assert_eq!(first["displayName"], "Claude Opus 4.5");
    assert!(first["lastUpdated"].is_string());
    assert!(first["pricing"]["outputPricePerMillion"].is_number());
}
