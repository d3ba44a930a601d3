//! Deflection payload types and delta-v calculations.
//!
//! Implements physics for:
//! - Kinetic impactor (DART-style): momentum transfer with ejecta amplification
//! - Nuclear standoff: vaporization impulse

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::units::UnitConverter;

/// DART's closing speed on Dimorphos (m/s).
pub const DART_IMPACT_SPEED_M_S: f64 = 6_145.0;

/// Reference body for the standoff scaling: a 300 m sphere at 3000 kg/m³ (kg).
const NUCLEAR_REFERENCE_MASS_KG: f64 = 4.241_150_082_346_22e10;

/// Delta-v delivered to the reference body by a 100 kt standoff burst (m/s).
const NUCLEAR_REFERENCE_DELTA_V: f64 = 0.02;

const NUCLEAR_REFERENCE_YIELD_KT: f64 = 100.0;

/// Deflection payload configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DeflectionPayload {
    /// Kinetic impactor - transfers momentum through collision.
    ///
    /// Delta-v = β × (m × v_rel) / M_asteroid
    /// where β is the momentum enhancement factor from ejecta.
    Kinetic {
        /// Impactor mass (kg).
        mass_kg: f64,
        /// Momentum enhancement factor (dimensionless, ≥ 1).
        /// DART measured β ≈ 3.6 for Dimorphos.
        beta: f64,
    },

    /// Nuclear standoff detonation - vaporizes surface material.
    ///
    /// Scaled from LLNL studies: ~2 cm/s per 100 kt on a 300 m asteroid,
    /// linear in yield and inverse in target mass.
    Nuclear {
        /// Weapon yield (kilotons TNT equivalent).
        yield_kt: f64,
    },
}

impl Default for DeflectionPayload {
    fn default() -> Self {
        Self::dart()
    }
}

impl DeflectionPayload {
    /// The DART spacecraft as flown: 580 kg at impact, β = 3.6.
    pub fn dart() -> Self {
        Self::Kinetic {
            mass_kg: 580.0,
            beta: 3.6,
        }
    }

    pub fn kinetic(mass_kg: f64, beta: f64) -> Self {
        Self::Kinetic { mass_kg, beta }
    }

    pub fn nuclear(yield_kt: f64) -> Self {
        Self::Nuclear { yield_kt }
    }

    /// Reject payloads that cannot be flown.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            DeflectionPayload::Kinetic { mass_kg, beta } => {
                UnitConverter::positive("impactor_mass", mass_kg)?;
                let beta = UnitConverter::finite("beta", beta)?;
                if beta < 1.0 {
                    return Err(SimError::invalid(
                        "beta",
                        format!("momentum enhancement cannot be below 1, got {beta}"),
                    ));
                }
            }
            DeflectionPayload::Nuclear { yield_kt } => {
                UnitConverter::positive("yield_kt", yield_kt)?;
            }
        }
        Ok(())
    }

    /// Calculate the delta-v magnitude imparted to the asteroid (m/s).
    ///
    /// # Arguments
    /// * `asteroid_mass` - Mass of the asteroid (kg)
    /// * `relative_velocity` - Closing speed of the impactor (m/s), kinetic only
    pub fn delta_v(&self, asteroid_mass: f64, relative_velocity: f64) -> f64 {
        match *self {
            DeflectionPayload::Kinetic { mass_kg, beta } => {
                beta * mass_kg * relative_velocity / asteroid_mass
            }
            DeflectionPayload::Nuclear { yield_kt } => {
                NUCLEAR_REFERENCE_DELTA_V
                    * (yield_kt / NUCLEAR_REFERENCE_YIELD_KT)
                    * (NUCLEAR_REFERENCE_MASS_KG / asteroid_mass)
            }
        }
    }

    /// Get a human-readable description of the payload.
    pub fn description(&self) -> String {
        match self {
            DeflectionPayload::Kinetic { mass_kg, beta } => {
                format!("Kinetic Impactor ({:.0} kg, β={:.1})", mass_kg, beta)
            }
            DeflectionPayload::Nuclear { yield_kt } => {
                format!("Nuclear Standoff ({:.0} kt)", yield_kt)
            }
        }
    }
}
