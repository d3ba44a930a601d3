//! Straight-line close-approach deflection.
//!
//! The nominal approach is treated as a straight relative trajectory. A
//! delta-v applied perpendicular to it moves the point of closest approach
//! sideways by Δd = Δv · t, where t is the encounter window. Positive Δv
//! pushes the trajectory outward, negative Δv pulls it toward Earth.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_ENCOUNTER_TIME_S;

/// Time over which a lateral delta-v accumulates displacement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EncounterWindow {
    /// A fixed window (seconds), independent of the approach geometry.
    Fixed { seconds: f64 },
    /// The time to cover the miss distance at approach speed (miss / v).
    ///
    /// Zero miss distance gives a zero window and therefore no displacement.
    TimeToClosestApproach,
}

impl Default for EncounterWindow {
    fn default() -> Self {
        Self::Fixed {
            seconds: DEFAULT_ENCOUNTER_TIME_S,
        }
    }
}

impl EncounterWindow {
    /// Window length in seconds. `velocity_m_s` must be positive.
    pub fn seconds(&self, miss_distance_m: f64, velocity_m_s: f64) -> f64 {
        match *self {
            EncounterWindow::Fixed { seconds } => seconds,
            EncounterWindow::TimeToClosestApproach => miss_distance_m / velocity_m_s,
        }
    }
}

/// What to report when the displaced trajectory crosses to the other side.
///
/// A miss distance is a non-negative scalar. A raw negative value means the
/// push overshot through the center line and the asteroid now passes on the
/// opposite side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissPolicy {
    /// Report |raw|: the distance on the opposite side.
    #[default]
    Fold,
    /// Report max(raw, 0): an overshoot counts as a direct hit.
    Clamp,
}

impl MissPolicy {
    pub fn apply(&self, raw_m: f64) -> f64 {
        match self {
            MissPolicy::Fold => raw_m.abs(),
            MissPolicy::Clamp => raw_m.max(0.0),
        }
    }
}

/// Result of applying a delta-v to an approach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deflection {
    /// Encounter window used (s).
    pub window_s: f64,
    /// Signed lateral displacement (m).
    pub displacement_m: f64,
    /// Miss distance before folding or clamping (m). May be negative.
    pub raw_miss_m: f64,
    /// Reported miss distance (m), never negative.
    pub new_miss_m: f64,
}

impl Deflection {
    /// True when the delta-v moved nothing.
    pub fn is_identity(&self) -> bool {
        self.displacement_m == 0.0
    }
}

/// Lateral-displacement deflection model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeflectionModel {
    pub window: EncounterWindow,
    pub miss_policy: MissPolicy,
}

impl DeflectionModel {
    pub fn new(window: EncounterWindow, miss_policy: MissPolicy) -> Self {
        Self {
            window,
            miss_policy,
        }
    }

    /// Apply `delta_v_m_s` to an approach with the given miss distance (m)
    /// and approach speed (m/s).
    ///
    /// A zero delta-v returns `miss_distance_m` unchanged, bit for bit.
    pub fn apply(
        &self,
        miss_distance_m: f64,
        velocity_m_s: f64,
        delta_v_m_s: f64,
    ) -> Deflection {
        let window_s = self.window.seconds(miss_distance_m, velocity_m_s);
        let displacement_m = delta_v_m_s * window_s;

        if displacement_m == 0.0 {
            return Deflection {
                window_s,
                displacement_m: 0.0,
                raw_miss_m: miss_distance_m,
                new_miss_m: miss_distance_m,
            };
        }

        let raw_miss_m = miss_distance_m + displacement_m;
        Deflection {
            window_s,
            displacement_m,
            raw_miss_m,
            new_miss_m: self.miss_policy.apply(raw_miss_m),
        }
    }

    /// Delta-v (m/s) needed to move the closest approach out to `target_miss_m`.
    ///
    /// Only meaningful for a fixed window; the closest-approach window
    /// depends on the miss distance itself.
    pub fn required_delta_v(
        &self,
        miss_distance_m: f64,
        velocity_m_s: f64,
        target_miss_m: f64,
    ) -> Option<f64> {
        let window_s = self.window.seconds(miss_distance_m, velocity_m_s);
        if window_s > 0.0 && window_s.is_finite() {
            Some((target_miss_m - miss_distance_m) / window_s)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_delta_v_is_identity() {
        let model = DeflectionModel::default();
        for miss in [0.0, 0.1, 1.0e3, 5.0e6, 1.234_567_89e10] {
            let result = model.apply(miss, 20_000.0, 0.0);
            assert_eq!(result.new_miss_m.to_bits(), miss.to_bits());
            assert!(result.is_identity());
        }
    }

    #[test]
    fn test_negative_zero_delta_v_is_identity() {
        let result = DeflectionModel::default().apply(5.0e6, 20_000.0, -0.0);
        assert_eq!(result.new_miss_m, 5.0e6);
        assert!(result.new_miss_m.is_sign_positive());
    }

    #[test]
    fn test_fixed_window_displacement() {
        // 1 m/s for 10 days = 864 km
        let result = DeflectionModel::default().apply(5.0e6, 20_000.0, 1.0);
        assert_eq!(result.window_s, 864_000.0);
        assert_relative_eq!(result.displacement_m, 864_000.0);
        assert_relative_eq!(result.new_miss_m, 5.864e6);
    }

    #[test]
    fn test_overshoot_folds_by_default() {
        // -10 m/s over 10 days pulls the approach 8640 km inward
        let result = DeflectionModel::default().apply(5.0e6, 20_000.0, -10.0);
        assert_relative_eq!(result.raw_miss_m, -3.64e6);
        assert_relative_eq!(result.new_miss_m, 3.64e6);
    }

    #[test]
    fn test_overshoot_clamps_when_configured() {
        let model = DeflectionModel::new(EncounterWindow::default(), MissPolicy::Clamp);
        let result = model.apply(5.0e6, 20_000.0, -10.0);
        assert_eq!(result.new_miss_m, 0.0);
    }

    #[test]
    fn test_time_to_closest_approach_window() {
        let model = DeflectionModel::new(EncounterWindow::TimeToClosestApproach, MissPolicy::Fold);
        // 5000 km at 20 km/s = 250 s; 2 m/s → 500 m
        let result = model.apply(5.0e6, 20_000.0, 2.0);
        assert_relative_eq!(result.window_s, 250.0);
        assert_relative_eq!(result.new_miss_m, 5.0e6 + 500.0);

        // Nothing to accumulate over when already on a collision course
        let head_on = model.apply(0.0, 20_000.0, 2.0);
        assert_eq!(head_on.new_miss_m, 0.0);
    }

    #[test]
    fn test_required_delta_v_to_clear_earth() {
        let model = DeflectionModel::default();
        let dv = model
            .required_delta_v(3.0e6, 20_000.0, 6.371e6)
            .expect("fixed window");
        let result = model.apply(3.0e6, 20_000.0, dv);
        assert_relative_eq!(result.new_miss_m, 6.371e6, max_relative = 1e-12);
    }
}
