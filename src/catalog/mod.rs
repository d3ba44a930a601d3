//! Near-Earth object catalog.
//!
//! The catalog is the only state that outlives a request. A refresh loads a
//! complete record set from a [`CatalogSource`] and publishes it by swapping
//! one `Arc`; readers clone that `Arc` and never observe a partial update.

pub mod neows;

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::types::CalendarDate;

pub use neows::{FeedFile, FeedWindow, parse_feed};
#[cfg(feature = "neows")]
pub use neows::NeoWsClient;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed feed: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "neows")]
    #[error("could not reach catalog service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog window: {0}")]
    InvalidWindow(String),
}

/// One close-approaching object as served to the front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidRecord {
    pub id: String,
    pub name: String,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub miss_distance_km: f64,
    /// Date of the close approach, when the source provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date: Option<CalendarDate>,
    /// "Potentially hazardous" flag, when the source provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazardous: Option<bool>,
}

impl AsteroidRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        diameter_m: f64,
        velocity_km_s: f64,
        miss_distance_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            diameter_m,
            velocity_km_s,
            miss_distance_km,
            close_approach_date: None,
            hazardous: None,
        }
    }

    /// Check the record invariants, naming the first violated field.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id is empty".to_string());
        }
        if !(self.diameter_m.is_finite() && self.diameter_m > 0.0) {
            return Err(format!("diameter_m must be positive, got {}", self.diameter_m));
        }
        if !(self.velocity_km_s.is_finite() && self.velocity_km_s > 0.0) {
            return Err(format!(
                "velocity_km_s must be positive, got {}",
                self.velocity_km_s
            ));
        }
        if !(self.miss_distance_km.is_finite() && self.miss_distance_km >= 0.0) {
            return Err(format!(
                "miss_distance_km must not be negative, got {}",
                self.miss_distance_km
            ));
        }
        Ok(())
    }
}

/// An immutable, published set of records.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    records: Vec<AsteroidRecord>,
    /// Count of successful publications, 0 before the first one.
    pub generation: u64,
}

impl CatalogSnapshot {
    pub fn records(&self) -> &[AsteroidRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AsteroidRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Anything that can produce a full record set.
pub trait CatalogSource {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<AsteroidRecord>, CatalogError>;
}

/// Single-writer, many-reader holder of the current snapshot.
#[derive(Debug, Default)]
pub struct Catalog {
    current: RwLock<Arc<CatalogSnapshot>>,
    last_error: RwLock<Option<String>>,
}

impl Catalog {
    /// An empty catalog that has never been loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with `records`.
    pub fn with_records(records: Vec<AsteroidRecord>) -> Self {
        let catalog = Self::new();
        catalog.publish(records);
        catalog
    }

    /// The current snapshot. Cheap: clones one `Arc`.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        // The guarded value is a single Arc, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Error from the most recent failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Validate, de-duplicate and atomically publish a new record set.
    ///
    /// Invalid records are dropped with a warning. When an id repeats, the
    /// first occurrence wins. Returns the published snapshot.
    pub fn publish(&self, records: Vec<AsteroidRecord>) -> Arc<CatalogSnapshot> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if let Err(reason) = record.validate() {
                log::warn!("Dropping catalog record '{}': {}", record.id, reason);
                continue;
            }
            if !seen.insert(record.id.clone()) {
                log::warn!("Dropping duplicate catalog record '{}'", record.id);
                continue;
            }
            kept.push(record);
        }

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let snapshot = Arc::new(CatalogSnapshot {
            records: kept,
            generation: guard.generation + 1,
        });
        *guard = Arc::clone(&snapshot);
        drop(guard);

        *self.last_error.write().unwrap_or_else(|e| e.into_inner()) = None;
        snapshot
    }

    /// Load from `source` and publish. On failure the previous snapshot stays
    /// in place and the error is remembered.
    pub fn refresh(
        &self,
        source: &dyn CatalogSource,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        // Loading happens outside any lock; readers keep the old snapshot meanwhile.
        match source.load() {
            Ok(records) => {
                let snapshot = self.publish(records);
                log::info!(
                    "Catalog refreshed from {}: {} objects (generation {})",
                    source.describe(),
                    snapshot.len(),
                    snapshot.generation
                );
                Ok(snapshot)
            }
            Err(err) => {
                log::warn!("Catalog refresh from {} failed: {}", source.describe(), err);
                let mut last_error = self.last_error.write().unwrap_or_else(|e| e.into_inner());
                *last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
