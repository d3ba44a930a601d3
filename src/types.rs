//! Core physical constants and calendar helpers shared by the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Physical constants (SI units unless the name says otherwise)

/// Earth's mean radius in kilometers. Miss distances at or below this are impacts.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Energy released by one megaton of TNT (joules)
pub const JOULES_PER_MEGATON_TNT: f64 = 4.184e15;

/// Energy released by one kiloton of TNT (joules)
pub const JOULES_PER_KILOTON_TNT: f64 = 4.184e12;

/// Typical bulk density of a rocky (S-type) asteroid (kg/m³)
pub const DENSITY_ROCKY_ASTEROID: f64 = 3000.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Default encounter window over which a lateral delta-v accumulates (10 days, seconds).
pub const DEFAULT_ENCOUNTER_TIME_S: f64 = 10.0 * SECONDS_PER_DAY;

/// A proleptic Gregorian calendar date (UTC).
///
/// Used for catalog query windows, which are expressed as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid calendar date '{0}' (expected YYYY-MM-DD)")]
pub struct DateParseError(pub String);

impl CalendarDate {
    /// Create a date, returning `None` for impossible month/day combinations.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Today's date in UTC according to the system clock.
    pub fn today_utc() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        // A clock set before 1970 is treated as the epoch itself.
        let unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::from_days_since_epoch(unix_secs.div_euclid(86400))
    }

    /// Date for a count of days since the Unix epoch (1970-01-01).
    pub fn from_days_since_epoch(days: i64) -> Self {
        let (year, month, day) = days_to_ymd(days);
        Self { year, month, day }
    }

    /// Days since the Unix epoch (1970-01-01).
    pub fn days_since_epoch(&self) -> i64 {
        ymd_to_days(self.year, self.month, self.day)
    }

    /// Date `days` days after this one (negative moves backwards).
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_epoch(self.days_since_epoch() + days)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let month = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        Self::new(year, month, day).ok_or_else(err)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert days since Unix epoch to year, month, day
fn days_to_ymd(days: i64) -> (i32, u32, u32) {
    // Algorithm for Gregorian calendar
    let remaining_days = days + 719468; // Days from year 0 to 1970

    let era = if remaining_days >= 0 {
        remaining_days / 146097
    } else {
        (remaining_days - 146096) / 146097
    };

    let day_of_era = (remaining_days - era * 146097) as u32;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
    let year = (year_of_era as i64 + era * 400) as i32;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };

    (year, month, day)
}

/// Inverse of [`days_to_ymd`].
fn ymd_to_days(year: i32, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;
    let mp = (if month > 2 { month - 3 } else { month + 9 }) as i64;
    let day_of_year = (153 * mp + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146097 + day_of_era - 719468
}
