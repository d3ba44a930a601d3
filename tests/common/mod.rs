//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use aegis::api::{Api, ApiResponse};
use aegis::catalog::{AsteroidRecord, Catalog};
use aegis::config::EngineConfig;

/// Path of the bundled NeoWs feed fixture.
pub fn feed_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/neows_feed.json")
}

/// Two hand-written records with distinct ids.
pub fn records() -> Vec<AsteroidRecord> {
    vec![
        AsteroidRecord::new("1001", "(2024 AA)", 140.0, 18.0, 5000.0),
        AsteroidRecord::new("1002", "(2024 AB)", 25.0, 11.5, 384_400.0),
    ]
}

/// An API over the default config and a catalog holding `records`.
pub fn api_with(records: Vec<AsteroidRecord>) -> Api {
    Api::new(
        &EngineConfig::default(),
        Arc::new(Catalog::with_records(records)),
    )
}

pub fn post(api: &Api, path: &str, body: &str) -> ApiResponse {
    api.handle("POST", path, body)
}

/// Keys of a JSON object body, sorted.
pub fn keys(response: &ApiResponse) -> Vec<String> {
    let mut keys: Vec<String> = response
        .body
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
