//! Property-based tests for the physics models using proptest.
//!
//! These tests verify ordering and identity invariants across the whole
//! supported input range rather than at hand-picked points.

use proptest::prelude::*;

use super::{
    DeflectionModel, EncounterWindow, ImpactEnergyModel, LogEnergyMagnitude, MissPolicy,
    PowerLawCrater,
};
use crate::units::UnitConverter;

fn any_window() -> impl Strategy<Value = EncounterWindow> {
    prop_oneof![
        (1.0f64..1.0e8).prop_map(|seconds| EncounterWindow::Fixed { seconds }),
        Just(EncounterWindow::TimeToClosestApproach),
    ]
}

fn any_policy() -> impl Strategy<Value = MissPolicy> {
    prop_oneof![Just(MissPolicy::Fold), Just(MissPolicy::Clamp)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Bigger impactors carry more energy at the same speed.
    #[test]
    fn prop_energy_increases_with_diameter(
        diameter in 0.1f64..1.0e7,
        growth in 1.0e-6f64..10.0,
        velocity in 100.0f64..3.0e5,
    ) {
        let model = ImpactEnergyModel::default();
        let small = model.evaluate(diameter, velocity);
        let large = model.evaluate(diameter * (1.0 + growth), velocity);
        prop_assert!(large.joules > small.joules);
        prop_assert!(large.megatons > small.megatons);
    }

    /// Faster impactors carry more energy at the same size.
    #[test]
    fn prop_energy_increases_with_velocity(
        diameter in 0.1f64..1.0e7,
        velocity in 100.0f64..3.0e5,
        growth in 1.0e-6f64..10.0,
    ) {
        let model = ImpactEnergyModel::default();
        let slow = model.evaluate(diameter, velocity);
        let fast = model.evaluate(diameter, velocity * (1.0 + growth));
        prop_assert!(fast.joules > slow.joules);
    }

    /// Crater size and magnitude preserve the ordering of energies.
    #[test]
    fn prop_scaling_laws_monotonic(
        log_energy in -20.0f64..38.0,
        growth in 1.0e-6f64..10.0,
    ) {
        let low = 10f64.powf(log_energy);
        let high = low * (1.0 + growth);
        let crater = PowerLawCrater::default();
        let seismic = LogEnergyMagnitude::default();
        prop_assert!(crater.diameter_km(high) > crater.diameter_km(low));
        prop_assert!(seismic.magnitude(high) > seismic.magnitude(low));
    }

    /// Seismic magnitude never fails, however small the energy.
    #[test]
    fn prop_seismic_finite_near_zero(energy in 0.0f64..1.0e-3) {
        prop_assert!(LogEnergyMagnitude::default().magnitude(energy).is_finite());
        prop_assert!(PowerLawCrater::default().diameter_km(energy) >= 0.0);
    }

    /// No push, no change: the result is the input bit for bit.
    #[test]
    fn prop_zero_delta_v_identity(
        miss in 0.0f64..1.0e13,
        velocity in 1.0f64..3.0e5,
        window in any_window(),
        policy in any_policy(),
    ) {
        let result = DeflectionModel::new(window, policy).apply(miss, velocity, 0.0);
        prop_assert_eq!(result.new_miss_m.to_bits(), miss.to_bits());
    }

    /// An outward push always widens the miss.
    #[test]
    fn prop_outward_push_widens_miss(
        miss in 0.0f64..1.0e10,
        velocity in 1.0f64..3.0e5,
        delta_v in 1.0e-3f64..100.0,
        extra in 1.0e-3f64..100.0,
    ) {
        let model = DeflectionModel::default();
        let weak = model.apply(miss, velocity, delta_v);
        let strong = model.apply(miss, velocity, delta_v + extra);
        prop_assert!(strong.new_miss_m > weak.new_miss_m);
        prop_assert!(weak.new_miss_m > miss);
    }

    /// An inward push narrows the miss until the trajectory crosses over.
    #[test]
    fn prop_inward_push_narrows_miss(
        miss in 1.0e6f64..1.0e10,
        velocity in 1.0f64..3.0e5,
        delta_v in 1.0e-3f64..100.0,
        extra in 1.0e-3f64..100.0,
    ) {
        let model = DeflectionModel::default();
        let weak = model.apply(miss, velocity, -delta_v);
        let strong = model.apply(miss, velocity, -(delta_v + extra));
        prop_assume!(strong.raw_miss_m >= 0.0);
        prop_assert!(strong.new_miss_m < weak.new_miss_m);
    }

    /// Reported miss distance is never negative, under either policy.
    #[test]
    fn prop_miss_never_negative(
        miss in 0.0f64..1.0e10,
        velocity in 1.0f64..3.0e5,
        delta_v in -1.0e4f64..1.0e4,
        window in any_window(),
        policy in any_policy(),
    ) {
        let result = DeflectionModel::new(window, policy).apply(miss, velocity, delta_v);
        prop_assert!(result.new_miss_m >= 0.0);
    }

    /// Request units survive a trip through SI and back.
    #[test]
    fn prop_unit_round_trip(value in 1.0e-6f64..1.0e12) {
        let km = UnitConverter::m_to_km(UnitConverter::km_to_m(value));
        let km_s = UnitConverter::m_s_to_km_s(UnitConverter::km_s_to_m_s(value));
        prop_assert!(((km - value) / value).abs() < 1e-9);
        prop_assert!(((km_s - value) / value).abs() < 1e-9);
    }
}
