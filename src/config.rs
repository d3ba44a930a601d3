//! Engine configuration.
//!
//! Every constant the physics depends on lives here so that results are
//! reproducible from the config alone. Missing fields fall back to the
//! defaults, so an empty RON struct `()` is a valid config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::physics::{
    DeflectionModel, EncounterWindow, ImpactEnergyModel, LogEnergyMagnitude, PowerLawCrater,
};

/// Environment variable that overrides `catalog.api_key`.
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// NASA NeoWs feed endpoint.
pub const NEOWS_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Upper bounds beyond which inputs are rejected as physically implausible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted impactor diameter (m). Default 10⁵ km.
    pub max_diameter_m: f64,
    /// Largest accepted approach speed (km/s).
    pub max_velocity_km_s: f64,
    /// Largest accepted miss distance (km).
    pub max_miss_distance_km: f64,
    /// Largest accepted |delta-v| (m/s).
    pub max_delta_v_m_s: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_diameter_m: 1.0e8,
            max_velocity_km_s: 300.0,
            max_miss_distance_km: 1.0e10,
            max_delta_v_m_s: 1.0e4,
        }
    }
}

/// Where and how the asteroid catalog is fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: String,
    /// Length of the close-approach window (days). NeoWs caps this at 7.
    pub window_days: u32,
    pub timeout_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: NEOWS_FEED_URL.to_string(),
            api_key: "DEMO_KEY".to_string(),
            window_days: 7,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Round endpoint outputs to display precision.
    pub round_outputs: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            round_outputs: true,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub energy: ImpactEnergyModel,
    pub crater: PowerLawCrater,
    pub seismic: LogEnergyMagnitude,
    pub deflection: DeflectionModel,
    pub limits: Limits,
    pub catalog: CatalogSettings,
    pub api: ApiSettings,
}

impl EngineConfig {
    /// Load and validate a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides (currently only the NeoWs API key).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.catalog.api_key = key.trim().to_string();
        }
        self
    }

    /// Reject constants that would make the models meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("energy.density_kg_m3", self.energy.density_kg_m3)?;
        positive("energy.joules_per_megaton", self.energy.joules_per_megaton)?;
        positive("crater.coefficient_m", self.crater.coefficient_m)?;
        positive("crater.exponent", self.crater.exponent)?;
        positive("seismic.slope", self.seismic.slope)?;
        finite("seismic.offset", self.seismic.offset)?;
        if let EncounterWindow::Fixed { seconds } = self.deflection.window {
            positive("deflection.window.seconds", seconds)?;
        }
        positive("limits.max_diameter_m", self.limits.max_diameter_m)?;
        positive("limits.max_velocity_km_s", self.limits.max_velocity_km_s)?;
        positive("limits.max_miss_distance_km", self.limits.max_miss_distance_km)?;
        positive("limits.max_delta_v_m_s", self.limits.max_delta_v_m_s)?;
        if !(1..=7).contains(&self.catalog.window_days) {
            return Err(ConfigError::Invalid {
                field: "catalog.window_days",
                reason: format!("must be between 1 and 7, got {}", self.catalog.window_days),
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}
