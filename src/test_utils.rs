//! Test utilities for the impact and deflection engine.
//!
//! Provides catalog fixtures and assertions shared by unit tests.

/// Fixtures for building test catalogs and services.
pub mod fixtures {
    use crate::catalog::AsteroidRecord;
    use crate::config::EngineConfig;
    use crate::simulation::{DeflectionSimulationService, ImpactSimulationService};

    /// A NeoWs feed with two usable objects and one without approach data.
    pub const SAMPLE_FEED: &str = include_str!("../tests/fixtures/neows_feed.json");

    /// Three catalog records spanning small, medium and large impactors.
    pub fn sample_records() -> Vec<AsteroidRecord> {
        vec![
            AsteroidRecord::new("2465633", "465633 (2009 JR5)", 352.75, 18.127_936_086_2, 45_290_298.2),
            AsteroidRecord::new("3726710", "(2015 RC)", 59.37, 19.485_029_528_4, 4_027_630.3),
            AsteroidRecord::new("54016565", "(2020 QG)", 4.5, 12.3, 2_950.0),
        ]
    }

    pub fn impact_service() -> ImpactSimulationService {
        ImpactSimulationService::from_config(&EngineConfig::default())
    }

    pub fn deflection_service() -> DeflectionSimulationService {
        DeflectionSimulationService::from_config(&EngineConfig::default())
    }
}

/// Assertions for numeric results.
pub mod assertions {
    /// Assert a value is finite and strictly positive.
    pub fn assert_positive_finite(label: &str, value: f64) {
        assert!(
            value.is_finite() && value > 0.0,
            "{label} should be positive and finite, got {value}"
        );
    }
}
