//! JSON boundary for the three front-end endpoints.
//!
//! [`Api::handle`] takes a method, a path and a raw body and returns a status
//! code plus a JSON body. It knows nothing about sockets, so any HTTP layer
//! can sit in front of it.
//!
//! | Route                          | Body                                 |
//! |--------------------------------|--------------------------------------|
//! | `GET /api/get_asteroids`       | none                                 |
//! | `POST /api/calculate_impact`   | `{diameter, velocity}`               |
//! | `POST /api/calculate_deflection` | `{miss_distance, velocity, delta_v}` |
//!
//! Numeric fields may be JSON numbers or numeric strings.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::SimError;
use crate::outcome::DeflectionOutcome;
use crate::simulation::{
    DeflectionRequest, DeflectionSimulationService, ImpactRequest, ImpactSimulationService,
};

pub const ROUTE_ASTEROIDS: &str = "/api/get_asteroids";
pub const ROUTE_IMPACT: &str = "/api/calculate_impact";
pub const ROUTE_DEFLECTION: &str = "/api/calculate_deflection";

/// Status code and JSON body of one response.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn failure(status: u16, kind: &str, message: impl Into<String>, field: Option<&str>) -> Self {
        Self {
            status,
            body: json!({
                "error": message.into(),
                "kind": kind,
                "field": field,
            }),
        }
    }

    fn from_sim_error(err: &SimError) -> Self {
        match err {
            SimError::InvalidInput { .. } => {
                Self::failure(400, err.kind(), err.to_string(), err.field())
            }
            SimError::OutOfRange { .. } => {
                Self::failure(422, err.kind(), err.to_string(), err.field())
            }
            // Details were logged where the fault happened
            SimError::Internal { .. } => {
                Self::failure(500, err.kind(), "simulation unavailable", None)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request router bound to a configured engine and a shared catalog.
pub struct Api {
    impact: ImpactSimulationService,
    deflection: DeflectionSimulationService,
    catalog: Arc<Catalog>,
    round_outputs: bool,
}

impl Api {
    pub fn new(config: &EngineConfig, catalog: Arc<Catalog>) -> Self {
        Self::with_services(
            ImpactSimulationService::from_config(config),
            DeflectionSimulationService::from_config(config),
            catalog,
            config.api.round_outputs,
        )
    }

    /// Build the router around already-configured services.
    pub fn with_services(
        impact: ImpactSimulationService,
        deflection: DeflectionSimulationService,
        catalog: Arc<Catalog>,
        round_outputs: bool,
    ) -> Self {
        Self {
            impact,
            deflection,
            catalog,
            round_outputs,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Dispatch one request.
    pub fn handle(&self, method: &str, path: &str, body: &str) -> ApiResponse {
        let path = path.split('?').next().unwrap_or(path);
        let expected = match path {
            ROUTE_ASTEROIDS => "GET",
            ROUTE_IMPACT | ROUTE_DEFLECTION => "POST",
            _ => {
                log::debug!("No route for {method} {path}");
                return ApiResponse::failure(
                    404,
                    "not_found",
                    format!("no such endpoint: {path}"),
                    None,
                );
            }
        };
        if !method.eq_ignore_ascii_case(expected) {
            return ApiResponse::failure(
                405,
                "method_not_allowed",
                format!("{path} only accepts {expected}"),
                None,
            );
        }

        let response = match path {
            ROUTE_ASTEROIDS => self.get_asteroids(),
            ROUTE_IMPACT => self.calculate_impact(body),
            _ => self.calculate_deflection(body),
        };
        log::debug!("{method} {path} -> {}", response.status);
        response
    }

    /// Current catalog as a JSON array.
    pub fn get_asteroids(&self) -> ApiResponse {
        let snapshot = self.catalog.snapshot();
        if snapshot.generation == 0
            && let Some(err) = self.catalog.last_error()
        {
            log::warn!("Serving get_asteroids without a catalog: {err}");
            return ApiResponse::failure(
                502,
                "upstream_unavailable",
                "asteroid catalog unavailable",
                None,
            );
        }
        match serde_json::to_value(snapshot.records()) {
            Ok(body) => ApiResponse::ok(body),
            Err(err) => {
                log::error!("Could not serialize catalog generation {}: {err}", snapshot.generation);
                ApiResponse::from_sim_error(&SimError::Internal {
                    stage: "catalog",
                    detail: err.to_string(),
                })
            }
        }
    }

    pub fn calculate_impact(&self, body: &str) -> ApiResponse {
        let request = match parse_object(body).and_then(|fields| {
            Ok(ImpactRequest {
                diameter_m: number_field(&fields, "diameter")?,
                velocity_km_s: number_field(&fields, "velocity")?,
            })
        }) {
            Ok(request) => request,
            Err(err) => return ApiResponse::from_sim_error(&err),
        };

        match self.impact.simulate(&request) {
            Ok(result) => ApiResponse::ok(json!({
                "energy_megatons": self.round(result.energy_megatons, 2),
                "crater_diameter_km": self.round(result.crater_diameter_km, 2),
                "seismic_magnitude": self.round(result.seismic_magnitude, 1),
            })),
            Err(err) => ApiResponse::from_sim_error(&err),
        }
    }

    pub fn calculate_deflection(&self, body: &str) -> ApiResponse {
        let request = match parse_object(body).and_then(|fields| {
            Ok(DeflectionRequest {
                miss_distance_km: number_field(&fields, "miss_distance")?,
                velocity_km_s: number_field(&fields, "velocity")?,
                delta_v_m_s: number_field(&fields, "delta_v")?,
            })
        }) {
            Ok(request) => request,
            Err(err) => return ApiResponse::from_sim_error(&err),
        };

        match self.deflection.simulate(&request) {
            Ok(result) => {
                // Classify the distance the caller sees, not the unrounded one
                let new_miss_distance_km = self.round(result.new_miss_distance_km, 2);
                ApiResponse::ok(json!({
                    "new_miss_distance_km": new_miss_distance_km,
                    "outcome": DeflectionOutcome::classify(new_miss_distance_km).label(),
                }))
            }
            Err(err) => ApiResponse::from_sim_error(&err),
        }
    }

    fn round(&self, value: f64, places: i32) -> f64 {
        if self.round_outputs {
            round_to(value, places)
        } else {
            value
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

fn parse_object(body: &str) -> Result<Map<String, Value>, SimError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(SimError::invalid(
            "body",
            format!("expected a JSON object, got {}", json_type(&other)),
        )),
        Err(err) => Err(SimError::invalid("body", format!("malformed JSON: {err}"))),
    }
}

/// Read a required numeric field, accepting numbers and numeric strings.
fn number_field(fields: &Map<String, Value>, name: &'static str) -> Result<f64, SimError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(SimError::invalid(name, "field is required")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| SimError::invalid(name, format!("{n} is not representable"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SimError::invalid(name, format!("'{s}' is not a number"))),
        Some(other) => Err(SimError::invalid(
            name,
            format!("expected a number, got {}", json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
