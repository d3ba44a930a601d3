//! Kinetic energy of a spherical impactor.

use serde::{Deserialize, Serialize};

use crate::types::{DENSITY_ROCKY_ASTEROID, JOULES_PER_MEGATON_TNT};

/// Mass and kinetic energy of an impactor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEnergy {
    /// Mass (kg).
    pub mass_kg: f64,
    /// Kinetic energy (J).
    pub joules: f64,
    /// TNT-equivalent yield (Mt).
    pub megatons: f64,
}

/// Sphere-of-uniform-density energy model.
///
/// mass = ρ · (4/3)πr³, E = ½mv²
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactEnergyModel {
    /// Bulk density (kg/m³).
    pub density_kg_m3: f64,
    /// Joules per megaton of TNT.
    pub joules_per_megaton: f64,
}

impl Default for ImpactEnergyModel {
    fn default() -> Self {
        Self {
            density_kg_m3: DENSITY_ROCKY_ASTEROID,
            joules_per_megaton: JOULES_PER_MEGATON_TNT,
        }
    }
}

impl ImpactEnergyModel {
    /// Mass of a sphere with the given diameter (meters).
    pub fn mass_kg(&self, diameter_m: f64) -> f64 {
        let radius = 0.5 * diameter_m;
        self.density_kg_m3 * (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3)
    }

    /// Kinetic energy (J) of a mass moving at `velocity_m_s`.
    pub fn kinetic_energy_j(mass_kg: f64, velocity_m_s: f64) -> f64 {
        0.5 * mass_kg * velocity_m_s * velocity_m_s
    }

    /// Full energy figures for an impactor of `diameter_m` at `velocity_m_s`.
    pub fn evaluate(&self, diameter_m: f64, velocity_m_s: f64) -> ImpactEnergy {
        let mass_kg = self.mass_kg(diameter_m);
        let joules = Self::kinetic_energy_j(mass_kg, velocity_m_s);
        ImpactEnergy {
            mass_kg,
            joules,
            megatons: joules / self.joules_per_megaton,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_140m_at_18_km_s() {
        let energy = ImpactEnergyModel::default().evaluate(140.0, 18_000.0);
        assert_relative_eq!(energy.mass_kg, 4.310_265_120_725e9, max_relative = 1e-12);
        assert_relative_eq!(energy.joules, 6.982_629_495_574_8e17, max_relative = 1e-12);
        assert_relative_eq!(energy.megatons, 166.888_850_276_6, max_relative = 1e-12);
    }

    #[test]
    fn test_energy_scales_with_cube_of_diameter() {
        let model = ImpactEnergyModel::default();
        let small = model.evaluate(50.0, 20_000.0);
        let large = model.evaluate(100.0, 20_000.0);
        assert_relative_eq!(large.joules / small.joules, 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_energy_scales_with_square_of_velocity() {
        let model = ImpactEnergyModel::default();
        let slow = model.evaluate(100.0, 10_000.0);
        let fast = model.evaluate(100.0, 30_000.0);
        assert_relative_eq!(fast.joules / slow.joules, 9.0, max_relative = 1e-12);
    }

    #[test]
    fn test_density_is_configurable() {
        let iron = ImpactEnergyModel {
            density_kg_m3: 7800.0,
            ..Default::default()
        };
        let rock = ImpactEnergyModel::default();
        assert_relative_eq!(
            iron.mass_kg(100.0) / rock.mass_kg(100.0),
            2.6,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_largest_supported_impactor_is_finite() {
        // 10⁵ km at 300 km/s
        let energy = ImpactEnergyModel::default().evaluate(1e8, 3e5);
        assert!(energy.joules.is_finite());
        assert!(energy.megatons.is_finite());
    }
}
