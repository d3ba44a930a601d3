//! NASA NeoWs feed source.
//!
//! The feed groups objects by close-approach date:
//!
//! ```text
//! { "near_earth_objects": { "2025-10-04": [ { "id", "name",
//!     "estimated_diameter": { "meters": { "estimated_diameter_min", .._max } },
//!     "close_approach_data": [ { "relative_velocity": { "kilometers_per_second": "18.1" },
//!                                "miss_distance": { "kilometers": "45290298.2" } } ] } ] } }
//! ```
//!
//! Speeds and distances arrive as decimal strings. Each object becomes one
//! [`AsteroidRecord`] using the mean estimated diameter and the first
//! close-approach entry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use super::{AsteroidRecord, CatalogError, CatalogSource};
use crate::types::CalendarDate;

/// Longest window the feed endpoint accepts (days).
pub const MAX_WINDOW_DAYS: u32 = 7;

/// Date range for a feed query: `start` through `start + days`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedWindow {
    pub start: CalendarDate,
    pub days: u32,
}

impl FeedWindow {
    pub fn new(start: CalendarDate, days: u32) -> Result<Self, CatalogError> {
        if days == 0 || days > MAX_WINDOW_DAYS {
            return Err(CatalogError::InvalidWindow(format!(
                "window must span 1 to {MAX_WINDOW_DAYS} days, got {days}"
            )));
        }
        Ok(Self { start, days })
    }

    /// Window starting today (UTC).
    pub fn from_today(days: u32) -> Result<Self, CatalogError> {
        Self::new(CalendarDate::today_utc(), days)
    }

    pub fn end(&self) -> CalendarDate {
        self.start.add_days(self.days as i64)
    }
}

/// A number the feed may send either bare or as a decimal string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(v) => Some(*v),
            Numeric::Text(s) => s.trim().parse().ok(),
            Numeric::Other(_) => None,
        }
    }
}

#[derive(Deserialize, Debug)]
struct Feed {
    near_earth_objects: BTreeMap<String, Vec<FeedObject>>,
}

// Everything below the date map is optional so one malformed object is
// skipped instead of failing the feed.

#[derive(Deserialize, Debug)]
struct FeedObject {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: Option<bool>,
    #[serde(default)]
    close_approach_data: Option<Vec<CloseApproach>>,
}

#[derive(Deserialize, Debug)]
struct EstimatedDiameter {
    #[serde(default)]
    meters: Option<DiameterRange>,
}

#[derive(Deserialize, Debug)]
struct DiameterRange {
    #[serde(default)]
    estimated_diameter_min: Option<Numeric>,
    #[serde(default)]
    estimated_diameter_max: Option<Numeric>,
}

#[derive(Deserialize, Debug)]
struct CloseApproach {
    #[serde(default)]
    close_approach_date: Option<String>,
    #[serde(default)]
    relative_velocity: Option<RelativeVelocity>,
    #[serde(default)]
    miss_distance: Option<MissDistance>,
}

#[derive(Deserialize, Debug)]
struct RelativeVelocity {
    #[serde(default)]
    kilometers_per_second: Option<Numeric>,
}

#[derive(Deserialize, Debug)]
struct MissDistance {
    #[serde(default)]
    kilometers: Option<Numeric>,
}

/// Either a raw NeoWs feed or an already-flattened record list (the
/// `get_asteroids` response saved to disk).
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum FeedDocument {
    Records(Vec<AsteroidRecord>),
    Feed(Feed),
}

impl FeedObject {
    fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    fn into_record(self) -> Result<AsteroidRecord, String> {
        let id = self.id.ok_or_else(|| "missing id".to_string())?;
        let range = self
            .estimated_diameter
            .as_ref()
            .and_then(|d| d.meters.as_ref());
        let min = range
            .and_then(|r| r.estimated_diameter_min.as_ref())
            .and_then(Numeric::value);
        let max = range
            .and_then(|r| r.estimated_diameter_max.as_ref())
            .and_then(Numeric::value);
        let (min, max) = match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err("missing or unreadable estimated diameter".to_string()),
        };

        let approach = self
            .close_approach_data
            .as_deref()
            .and_then(|approaches| approaches.first())
            .ok_or_else(|| "no close-approach data".to_string())?;
        let velocity_km_s = approach
            .relative_velocity
            .as_ref()
            .and_then(|v| v.kilometers_per_second.as_ref())
            .and_then(Numeric::value)
            .ok_or_else(|| "missing or unreadable relative velocity".to_string())?;
        let miss_distance_km = approach
            .miss_distance
            .as_ref()
            .and_then(|m| m.kilometers.as_ref())
            .and_then(Numeric::value)
            .ok_or_else(|| "missing or unreadable miss distance".to_string())?;
        let close_approach_date = approach
            .close_approach_date
            .as_deref()
            .and_then(|d| d.parse().ok());

        let record = AsteroidRecord {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            diameter_m: 0.5 * (min + max),
            velocity_km_s,
            miss_distance_km,
            close_approach_date,
            hazardous: self.is_potentially_hazardous_asteroid,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Parse a NeoWs feed (or a saved record list) into records.
///
/// Dates are visited in ascending order. Objects that cannot be turned into
/// a valid record are skipped with a warning rather than failing the feed.
pub fn parse_feed(json: &str) -> Result<Vec<AsteroidRecord>, CatalogError> {
    let feed = match serde_json::from_str::<FeedDocument>(json) {
        Ok(FeedDocument::Records(records)) => return Ok(records),
        Ok(FeedDocument::Feed(feed)) => feed,
        // Re-parse as a feed to get a useful error message
        Err(_) => serde_json::from_str::<Feed>(json)?,
    };

    let mut records = Vec::new();
    for (date, objects) in feed.near_earth_objects {
        for object in objects {
            let id = object.label().to_string();
            match object.into_record() {
                Ok(record) => records.push(record),
                Err(reason) => log::warn!("Skipping feed object {id} ({date}): {reason}"),
            }
        }
    }
    Ok(records)
}

/// A feed stored on disk.
#[derive(Clone, Debug)]
pub struct FeedFile(pub PathBuf);

impl CatalogSource for FeedFile {
    fn describe(&self) -> String {
        format!("file {}", self.0.display())
    }

    fn load(&self) -> Result<Vec<AsteroidRecord>, CatalogError> {
        let text = std::fs::read_to_string(&self.0)?;
        parse_feed(&text)
    }
}

#[cfg(feature = "neows")]
pub use client::NeoWsClient;

#[cfg(feature = "neows")]
mod client {
    use std::time::Duration;

    use super::{FeedWindow, parse_feed};
    use crate::catalog::{AsteroidRecord, CatalogError, CatalogSource};
    use crate::config::CatalogSettings;

    /// Blocking client for the live NeoWs feed.
    #[derive(Clone, Debug)]
    pub struct NeoWsClient {
        settings: CatalogSettings,
        /// Fixed window start; `None` means today.
        start: Option<crate::types::CalendarDate>,
    }

    impl NeoWsClient {
        pub fn new(settings: CatalogSettings) -> Self {
            Self {
                settings,
                start: None,
            }
        }

        /// Query a fixed window instead of one starting today.
        pub fn starting(mut self, start: crate::types::CalendarDate) -> Self {
            self.start = Some(start);
            self
        }

        fn window(&self) -> Result<FeedWindow, CatalogError> {
            match self.start {
                Some(start) => FeedWindow::new(start, self.settings.window_days),
                None => FeedWindow::from_today(self.settings.window_days),
            }
        }

        /// Fetch and parse the feed for `window`.
        pub fn fetch(&self, window: FeedWindow) -> Result<Vec<AsteroidRecord>, CatalogError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_millis(self.settings.timeout_ms))
                .build()?;
            log::debug!(
                "Requesting NeoWs feed {} .. {}",
                window.start,
                window.end()
            );
            let body = client
                .get(&self.settings.base_url)
                .query(&[
                    ("start_date", window.start.to_string()),
                    ("end_date", window.end().to_string()),
                    ("api_key", self.settings.api_key.clone()),
                ])
                .send()?
                .error_for_status()?
                .text()?;
            parse_feed(&body)
        }
    }

    impl CatalogSource for NeoWsClient {
        fn describe(&self) -> String {
            self.settings.base_url.clone()
        }

        fn load(&self) -> Result<Vec<AsteroidRecord>, CatalogError> {
            self.fetch(self.window()?)
        }
    }
}
