//! Energy to seismic magnitude.

use serde::{Deserialize, Serialize};

use super::EnergyToScalar;

/// Logarithmic magnitude law: M = slope · log10(E[J]) + offset.
///
/// The default, [`Self::aegis`], is the relation the Aegis front end has
/// always displayed: M = (2/3) log10 E − 2.9. [`Self::collins`] applies a
/// ~10⁻⁴ seismic efficiency and reads about three magnitudes lower. Small
/// impactors legitimately produce negative magnitudes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEnergyMagnitude {
    pub slope: f64,
    pub offset: f64,
}

impl Default for LogEnergyMagnitude {
    fn default() -> Self {
        Self::aegis()
    }
}

impl LogEnergyMagnitude {
    /// M = (2/3) log10 E − 2.9
    pub fn aegis() -> Self {
        Self {
            slope: 2.0 / 3.0,
            offset: -2.9,
        }
    }

    /// Collins et al. (2005): M = 0.67 log10 E − 5.87
    pub fn collins() -> Self {
        Self {
            slope: 0.67,
            offset: -5.87,
        }
    }

    /// Gutenberg–Richter energy relation log10 E = 1.5 M + 4.8, solved for M.
    ///
    /// Treats the whole kinetic energy as radiated seismic energy; 0.3 below
    /// [`Self::aegis`] at every energy.
    pub fn gutenberg_richter() -> Self {
        Self {
            slope: 2.0 / 3.0,
            offset: -3.2,
        }
    }

    /// Magnitude for an impact energy (J).
    ///
    /// Energies at or below `f64::MIN_POSITIVE` are floored to it, so the
    /// result is finite for every input.
    pub fn magnitude(&self, energy_joules: f64) -> f64 {
        let energy = if energy_joules > f64::MIN_POSITIVE {
            energy_joules
        } else {
            f64::MIN_POSITIVE
        };
        self.slope * energy.log10() + self.offset
    }
}

impl EnergyToScalar for LogEnergyMagnitude {
    fn name(&self) -> &str {
        "log-energy magnitude"
    }

    fn evaluate(&self, energy_joules: f64) -> f64 {
        self.magnitude(energy_joules)
    }
}
