//! Crater-size scaling.

use serde::{Deserialize, Serialize};

use super::EnergyToScalar;
use crate::types::METERS_PER_KM;

/// Power-law crater scaling: D[m] = k · E[J]^α, reported in kilometers.
///
/// The default exponent 0.294 is the familiar 1/3.4 yield-scaling exponent.
/// Energy is always joules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerLawCrater {
    /// Coefficient k (meters per J^α).
    pub coefficient_m: f64,
    /// Exponent α (dimensionless, 0 < α < 1).
    pub exponent: f64,
}

impl Default for PowerLawCrater {
    fn default() -> Self {
        Self {
            coefficient_m: 0.02,
            exponent: 0.294,
        }
    }
}

impl PowerLawCrater {
    /// Pure 1/3.4 yield scaling with a custom coefficient.
    pub fn yield_scaling(coefficient_m: f64) -> Self {
        Self {
            coefficient_m,
            exponent: 1.0 / 3.4,
        }
    }

    /// Final crater diameter (km) for an impact energy (J).
    ///
    /// Zero, negative and NaN energies produce no crater. `powf` on a
    /// negative base is NaN, so the guard must come first.
    pub fn diameter_km(&self, energy_joules: f64) -> f64 {
        if energy_joules.is_nan() || energy_joules <= 0.0 {
            return 0.0;
        }
        let diameter_m = self.coefficient_m * energy_joules.powf(self.exponent);
        (diameter_m / METERS_PER_KM).max(0.0)
    }
}

impl EnergyToScalar for PowerLawCrater {
    fn name(&self) -> &str {
        "power-law crater"
    }

    fn evaluate(&self, energy_joules: f64) -> f64 {
        self.diameter_km(energy_joules)
    }
}
