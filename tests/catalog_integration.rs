//! Catalog loading from feed files and publication through the API.

mod common;

use std::sync::Arc;

use aegis::api::{Api, ROUTE_ASTEROIDS};
use aegis::catalog::{Catalog, CatalogError, CatalogSource, FeedFile};
use aegis::config::EngineConfig;
use serde_json::json;

#[test]
fn test_empty_catalog_is_empty_list() {
    let api = common::api_with(Vec::new());
    let response = api.handle("GET", ROUTE_ASTEROIDS, "");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!([]));
}

#[test]
fn test_never_loaded_catalog_is_empty_list() {
    let api = Api::new(&EngineConfig::default(), Arc::new(Catalog::new()));
    assert_eq!(api.get_asteroids().body, json!([]));
}

#[test]
fn test_feed_file_round_trip_through_api() {
    let catalog = Arc::new(Catalog::new());
    let snapshot = catalog
        .refresh(&FeedFile(common::feed_fixture()))
        .expect("fixture loads");
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.generation, 1);

    let api = Api::new(&EngineConfig::default(), Arc::clone(&catalog));
    let response = api.get_asteroids();
    let list = response.body.as_array().expect("array body");
    assert_eq!(list[0]["id"], json!("2465633"));
    assert_eq!(list[0]["close_approach_date"], json!("2015-09-08"));
    assert_eq!(list[0]["hazardous"], json!(true));
    assert_eq!(list[1]["id"], json!("3726710"));
}

#[test]
fn test_missing_feed_file_keeps_previous_snapshot() {
    let catalog = Catalog::with_records(common::records());
    let err = catalog
        .refresh(&FeedFile("does/not/exist.json".into()))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
    assert_eq!(catalog.snapshot().len(), 2);
    assert!(catalog.last_error().is_some());
}

#[test]
fn test_saved_record_list_reloads() {
    let catalog = Catalog::new();
    catalog
        .refresh(&FeedFile(common::feed_fixture()))
        .expect("fixture loads");
    let saved = serde_json::to_string(catalog.snapshot().records()).expect("serializes");

    let path = std::env::temp_dir().join(format!("aegis-catalog-{}.json", std::process::id()));
    std::fs::write(&path, saved).expect("temp file writable");
    let source = FeedFile(path.clone());
    let reloaded = source.load();
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.expect("record list parses"), catalog.snapshot().records());
}

#[test]
fn test_catalog_records_simulate() {
    // Every catalog entry is a valid impact request
    let catalog = Catalog::new();
    catalog
        .refresh(&FeedFile(common::feed_fixture()))
        .expect("fixture loads");
    let api = common::api_with(catalog.snapshot().records().to_vec());
    for record in catalog.snapshot().records() {
        let body = json!({"diameter": record.diameter_m, "velocity": record.velocity_km_s});
        let response = api.handle("POST", "/api/calculate_impact", &body.to_string());
        assert_eq!(response.status, 200, "record {}", record.id);
    }
}
