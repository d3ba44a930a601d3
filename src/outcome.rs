//! Close-approach outcome classification.
//!
//! A trajectory whose closest approach lies inside Earth's mean radius is an
//! impact; anything strictly outside is a miss. The threshold matches what
//! the front end displays, so both sides agree on every boundary case.

use crate::types::EARTH_RADIUS_KM;

/// Outcome of a (possibly deflected) close approach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeflectionOutcome {
    /// Closest approach at or below Earth's surface.
    Impact {
        /// How far inside the radius the closest approach falls (km).
        depth_km: f64,
    },

    /// Closest approach clears Earth.
    Miss {
        /// Clearance above Earth's mean radius (km).
        margin_km: f64,
    },
}

impl DeflectionOutcome {
    /// Classify a miss distance measured from Earth's center (km).
    pub fn classify(miss_distance_km: f64) -> Self {
        if miss_distance_km > EARTH_RADIUS_KM {
            DeflectionOutcome::Miss {
                margin_km: miss_distance_km - EARTH_RADIUS_KM,
            }
        } else {
            DeflectionOutcome::Impact {
                depth_km: EARTH_RADIUS_KM - miss_distance_km,
            }
        }
    }

    /// Returns true if this is an impact outcome.
    pub fn is_impact(&self) -> bool {
        matches!(self, DeflectionOutcome::Impact { .. })
    }

    /// Returns true if this is a miss outcome.
    pub fn is_miss(&self) -> bool {
        matches!(self, DeflectionOutcome::Miss { .. })
    }

    /// Lowercase label used in responses.
    pub fn label(&self) -> &'static str {
        match self {
            DeflectionOutcome::Impact { .. } => "impact",
            DeflectionOutcome::Miss { .. } => "miss",
        }
    }
}
