//! Request-level simulation services.
//!
//! A service validates one request, converts it to SI units, runs the model
//! chain in a fixed order and assembles a flat result. Validation happens
//! before any model runs. A non-finite value coming out of a model is a
//! defect, not bad input, and is reported as [`SimError::Internal`].

use crate::config::{EngineConfig, Limits};
use crate::error::{SimError, SimResult};
use crate::outcome::DeflectionOutcome;
use crate::physics::{
    DeflectionModel, DeflectionPayload, EnergyToScalar, ImpactEnergyModel,
};
use crate::units::UnitConverter;

/// Impact simulation input, in request units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactRequest {
    pub diameter_m: f64,
    pub velocity_km_s: f64,
}

/// Impact simulation output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactResult {
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    pub seismic_magnitude: f64,
    pub mass_kg: f64,
    pub energy_joules: f64,
}

/// Deflection simulation input, in request units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeflectionRequest {
    pub miss_distance_km: f64,
    pub velocity_km_s: f64,
    pub delta_v_m_s: f64,
}

/// Deflection simulation output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeflectionResult {
    pub new_miss_distance_km: f64,
    /// Signed lateral displacement (km).
    pub displacement_km: f64,
    pub outcome: DeflectionOutcome,
}

/// Energy → crater → seismic chain for one impactor.
pub struct ImpactSimulationService {
    energy: ImpactEnergyModel,
    crater: Box<dyn EnergyToScalar>,
    seismic: Box<dyn EnergyToScalar>,
    limits: Limits,
}

impl ImpactSimulationService {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_models(
            config.energy.clone(),
            config.crater.clone(),
            config.seismic.clone(),
            config.limits.clone(),
        )
    }

    /// Build a service with custom crater and seismic laws.
    pub fn with_models(
        energy: ImpactEnergyModel,
        crater: impl EnergyToScalar + 'static,
        seismic: impl EnergyToScalar + 'static,
        limits: Limits,
    ) -> Self {
        Self {
            energy,
            crater: Box::new(crater),
            seismic: Box::new(seismic),
            limits,
        }
    }

    pub fn energy_model(&self) -> &ImpactEnergyModel {
        &self.energy
    }

    pub fn simulate(&self, request: &ImpactRequest) -> SimResult<ImpactResult> {
        let diameter_m = UnitConverter::diameter_m("diameter", request.diameter_m)?;
        at_most("diameter", diameter_m, self.limits.max_diameter_m)?;
        let velocity_m_s = UnitConverter::velocity_m_s("velocity", request.velocity_km_s)?;
        at_most("velocity", request.velocity_km_s, self.limits.max_velocity_km_s)?;

        let fault = |stage: &'static str, detail: String| {
            log::error!(
                "Impact model fault in {stage}: {detail} (diameter_m={}, velocity_km_s={})",
                request.diameter_m,
                request.velocity_km_s
            );
            SimError::Internal { stage, detail }
        };

        let energy = self.energy.evaluate(diameter_m, velocity_m_s);
        if !(energy.joules.is_finite() && energy.megatons.is_finite()) || energy.joules < 0.0 {
            return Err(fault("energy", format!("energy = {} J", energy.joules)));
        }

        let crater_diameter_km = self.crater.evaluate(energy.joules);
        if !crater_diameter_km.is_finite() || crater_diameter_km < 0.0 {
            return Err(fault(
                "crater",
                format!("{} returned {crater_diameter_km}", self.crater.name()),
            ));
        }

        let seismic_magnitude = self.seismic.evaluate(energy.joules);
        if !seismic_magnitude.is_finite() {
            return Err(fault(
                "seismic",
                format!("{} returned {seismic_magnitude}", self.seismic.name()),
            ));
        }

        let result = ImpactResult {
            energy_megatons: energy.megatons,
            crater_diameter_km,
            seismic_magnitude,
            mass_kg: energy.mass_kg,
            energy_joules: energy.joules,
        };
        log::debug!("Impact {request:?} -> {result:?}");
        Ok(result)
    }
}

/// Lateral delta-v applied to a close approach.
#[derive(Clone, Debug)]
pub struct DeflectionSimulationService {
    model: DeflectionModel,
    energy: ImpactEnergyModel,
    limits: Limits,
}

impl DeflectionSimulationService {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.deflection.clone(),
            config.energy.clone(),
            config.limits.clone(),
        )
    }

    pub fn new(model: DeflectionModel, energy: ImpactEnergyModel, limits: Limits) -> Self {
        Self {
            model,
            energy,
            limits,
        }
    }

    pub fn model(&self) -> &DeflectionModel {
        &self.model
    }

    pub fn simulate(&self, request: &DeflectionRequest) -> SimResult<DeflectionResult> {
        let miss_m = UnitConverter::distance_m("miss_distance", request.miss_distance_km)?;
        at_most(
            "miss_distance",
            request.miss_distance_km,
            self.limits.max_miss_distance_km,
        )?;
        let velocity_m_s = UnitConverter::velocity_m_s("velocity", request.velocity_km_s)?;
        at_most("velocity", request.velocity_km_s, self.limits.max_velocity_km_s)?;
        let delta_v = UnitConverter::delta_v_m_s("delta_v", request.delta_v_m_s)?;
        at_most("delta_v", delta_v.abs(), self.limits.max_delta_v_m_s)?;

        let deflection = self.model.apply(miss_m, velocity_m_s, delta_v);

        // Skip the km → m → km trip so the identity is exact.
        let new_miss_distance_km = if deflection.is_identity() {
            request.miss_distance_km
        } else {
            UnitConverter::m_to_km(deflection.new_miss_m)
        };

        if !new_miss_distance_km.is_finite() || new_miss_distance_km < 0.0 {
            let detail = format!("new miss distance = {new_miss_distance_km} km");
            log::error!(
                "Deflection model fault: {detail} (miss_distance_km={}, velocity_km_s={}, delta_v_m_s={}, model={:?})",
                request.miss_distance_km,
                request.velocity_km_s,
                request.delta_v_m_s,
                self.model
            );
            return Err(SimError::Internal {
                stage: "deflection",
                detail,
            });
        }

        let result = DeflectionResult {
            new_miss_distance_km,
            displacement_km: UnitConverter::m_to_km(deflection.displacement_m),
            outcome: DeflectionOutcome::classify(new_miss_distance_km),
        };
        log::debug!("Deflection {request:?} -> {result:?}");
        Ok(result)
    }

    /// Delta-v (m/s) a payload delivers to an asteroid of `diameter_m`,
    /// struck at `relative_velocity_km_s`.
    pub fn payload_delta_v(
        &self,
        diameter_m: f64,
        payload: &DeflectionPayload,
        relative_velocity_km_s: f64,
    ) -> SimResult<f64> {
        let diameter_m = UnitConverter::diameter_m("diameter", diameter_m)?;
        at_most("diameter", diameter_m, self.limits.max_diameter_m)?;
        payload.validate()?;
        let relative_velocity_m_s = match payload {
            DeflectionPayload::Kinetic { .. } => {
                UnitConverter::velocity_m_s("impactor_velocity", relative_velocity_km_s)?
            }
            DeflectionPayload::Nuclear { .. } => 0.0,
        };

        let mass_kg = self.energy.mass_kg(diameter_m);
        let delta_v = payload.delta_v(mass_kg, relative_velocity_m_s);
        if !delta_v.is_finite() {
            log::error!(
                "Payload fault: {} on {diameter_m} m body gave delta-v {delta_v}",
                payload.description()
            );
            return Err(SimError::Internal {
                stage: "payload",
                detail: format!("delta-v = {delta_v}"),
            });
        }
        Ok(delta_v)
    }

    /// Deflect an approach using the delta-v a payload delivers.
    pub fn simulate_payload(
        &self,
        miss_distance_km: f64,
        velocity_km_s: f64,
        diameter_m: f64,
        payload: &DeflectionPayload,
        impactor_velocity_km_s: f64,
    ) -> SimResult<(f64, DeflectionResult)> {
        let delta_v_m_s = self.payload_delta_v(diameter_m, payload, impactor_velocity_km_s)?;
        let result = self.simulate(&DeflectionRequest {
            miss_distance_km,
            velocity_km_s,
            delta_v_m_s,
        })?;
        Ok((delta_v_m_s, result))
    }
}

fn at_most(field: &'static str, value: f64, max: f64) -> SimResult<()> {
    if value > max {
        Err(SimError::OutOfRange { field, value, max })
    } else {
        Ok(())
    }
}
