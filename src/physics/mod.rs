//! Impact and deflection physics.
//!
//! Every model here is a plain value with a handful of constants and pure
//! methods. Nothing is cached between calls, so a model can be shared freely
//! across threads.
//!
//! - [`ImpactEnergyModel`]: diameter + velocity → mass, kinetic energy, TNT yield
//! - [`PowerLawCrater`]: energy → crater diameter
//! - [`LogEnergyMagnitude`]: energy → seismic magnitude
//! - [`DeflectionModel`]: miss distance + lateral delta-v → new miss distance
//! - [`DeflectionPayload`]: impactor/device parameters → delta-v

mod crater;
mod deflection;
mod energy;
pub mod payload;
mod seismic;

#[cfg(test)]
mod proptest_physics;

pub use crater::PowerLawCrater;
pub use deflection::{Deflection, DeflectionModel, EncounterWindow, MissPolicy};
pub use energy::{ImpactEnergy, ImpactEnergyModel};
pub use payload::DeflectionPayload;
pub use seismic::LogEnergyMagnitude;

/// An empirical law mapping impact energy (joules) to a single scalar.
///
/// Crater size and seismic magnitude are both expressed this way so an
/// alternative law can be swapped in without touching the services that
/// call it.
pub trait EnergyToScalar: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Evaluate the law for an energy in joules.
    fn evaluate(&self, energy_joules: f64) -> f64;
}

impl<T: EnergyToScalar + ?Sized> EnergyToScalar for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, energy_joules: f64) -> f64 {
        (**self).evaluate(energy_joules)
    }
}
