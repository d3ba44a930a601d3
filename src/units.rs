//! Unit canonicalization.
//!
//! Requests arrive in the units the front end uses (meters, km/s, km, m/s).
//! Every physics model works in SI base units (meters, meters per second,
//! joules) and results go back out in kilometers and megatons.

use crate::error::{SimError, SimResult};
use crate::types::{JOULES_PER_MEGATON_TNT, METERS_PER_KM};

/// Stateless converter between request units and SI working units.
pub struct UnitConverter;

impl UnitConverter {
    /// Reject NaN and infinities.
    pub fn finite(field: &'static str, value: f64) -> SimResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SimError::invalid(field, format!("must be a finite number, got {value}")))
        }
    }

    /// Finite and strictly greater than zero.
    pub fn positive(field: &'static str, value: f64) -> SimResult<f64> {
        let value = Self::finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(SimError::invalid(field, format!("must be greater than zero, got {value}")))
        }
    }

    /// Finite and not below zero.
    pub fn non_negative(field: &'static str, value: f64) -> SimResult<f64> {
        let value = Self::finite(field, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(SimError::invalid(field, format!("must not be negative, got {value}")))
        }
    }

    /// Diameter in meters. Already SI; validated only.
    pub fn diameter_m(field: &'static str, meters: f64) -> SimResult<f64> {
        Self::positive(field, meters)
    }

    /// Approach speed in km/s to m/s. Zero is rejected since models divide by it.
    pub fn velocity_m_s(field: &'static str, km_per_s: f64) -> SimResult<f64> {
        Self::positive(field, km_per_s).map(Self::km_s_to_m_s)
    }

    /// Miss distance in km to meters.
    pub fn distance_m(field: &'static str, km: f64) -> SimResult<f64> {
        Self::non_negative(field, km).map(Self::km_to_m)
    }

    /// Signed delta-v in m/s. Already SI; any finite value is allowed.
    pub fn delta_v_m_s(field: &'static str, m_per_s: f64) -> SimResult<f64> {
        Self::finite(field, m_per_s)
    }

    pub fn km_to_m(km: f64) -> f64 {
        km * METERS_PER_KM
    }

    pub fn m_to_km(m: f64) -> f64 {
        m / METERS_PER_KM
    }

    pub fn km_s_to_m_s(km_per_s: f64) -> f64 {
        km_per_s * METERS_PER_KM
    }

    pub fn m_s_to_km_s(m_per_s: f64) -> f64 {
        m_per_s / METERS_PER_KM
    }

    /// Joules to megatons of TNT using the given conversion factor.
    pub fn joules_to_megatons(joules: f64, joules_per_megaton: f64) -> f64 {
        joules / joules_per_megaton
    }

    pub fn megatons_to_joules(megatons: f64, joules_per_megaton: f64) -> f64 {
        megatons * joules_per_megaton
    }

    /// Joules to megatons with the standard 4.184e15 J/Mt factor.
    pub fn joules_to_standard_megatons(joules: f64) -> f64 {
        Self::joules_to_megatons(joules, JOULES_PER_MEGATON_TNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_conversion() {
        let v = UnitConverter::velocity_m_s("velocity", 18.0).expect("valid velocity");
        assert_eq!(v, 18_000.0);
        assert_relative_eq!(UnitConverter::m_s_to_km_s(v), 18.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_velocity_rejected() {
        let err = UnitConverter::velocity_m_s("velocity", 0.0).unwrap_err();
        assert_eq!(err.field(), Some("velocity"));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(UnitConverter::finite("delta_v", bad).is_err());
            assert!(UnitConverter::delta_v_m_s("delta_v", bad).is_err());
        }
    }

    #[test]
    fn test_zero_miss_distance_allowed() {
        assert_eq!(UnitConverter::distance_m("miss_distance", 0.0), Ok(0.0));
        assert!(UnitConverter::distance_m("miss_distance", -1.0).is_err());
    }

    #[test]
    fn test_negative_delta_v_allowed() {
        assert_eq!(UnitConverter::delta_v_m_s("delta_v", -2.5), Ok(-2.5));
    }

    #[test]
    fn test_megaton_round_trip() {
        let joules = 6.982629495574817e17;
        let mt = UnitConverter::joules_to_standard_megatons(joules);
        assert_relative_eq!(mt, 166.888_850_276_644_77, max_relative = 1e-12);
        assert_relative_eq!(
            UnitConverter::megatons_to_joules(mt, JOULES_PER_MEGATON_TNT),
            joules,
            max_relative = 1e-12
        );
    }
}
