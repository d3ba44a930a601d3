//! Aegis - Asteroid Impact and Deflection Engine
//!
//! Command-line front end: run single simulations, list the asteroid
//! catalog, or push a raw request through the JSON boundary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use aegis::api::Api;
use aegis::catalog::{Catalog, CatalogSource, FeedFile};
use aegis::config::EngineConfig;
use aegis::physics::DeflectionPayload;
use aegis::physics::payload::DART_IMPACT_SPEED_M_S;
use aegis::simulation::{
    DeflectionRequest, DeflectionSimulationService, ImpactRequest, ImpactSimulationService,
};
use aegis::types::CalendarDate;

#[derive(Parser, Debug)]
#[command(name = "aegis", version, about = "Asteroid impact and deflection engine")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, help = "Engine config file (RON)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Energy, crater and seismic magnitude of one impact
    Impact {
        #[arg(long, help = "Impactor diameter (m)")]
        diameter: f64,
        #[arg(long, help = "Impact velocity (km/s)")]
        velocity: f64,
    },
    /// New miss distance after a lateral delta-v
    Deflect {
        #[arg(long, help = "Nominal miss distance (km)")]
        miss_distance: f64,
        #[arg(long, help = "Approach velocity (km/s)")]
        velocity: f64,
        #[arg(
            long,
            allow_hyphen_values = true,
            conflicts_with = "payload",
            help = "Lateral delta-v (m/s), negative pushes inward"
        )]
        delta_v: Option<f64>,
        #[arg(long, value_enum, requires = "diameter")]
        payload: Option<PayloadKind>,
        #[arg(long, help = "Asteroid diameter (m), needed with --payload")]
        diameter: Option<f64>,
        #[arg(long, default_value_t = 580.0, help = "Kinetic impactor mass (kg)")]
        impactor_mass: f64,
        #[arg(long, default_value_t = 3.6, help = "Momentum enhancement factor")]
        beta: f64,
        #[arg(
            long,
            default_value_t = DART_IMPACT_SPEED_M_S / 1000.0,
            help = "Impactor closing speed (km/s)"
        )]
        impactor_velocity: f64,
        #[arg(long, default_value_t = 100.0, help = "Standoff device yield (kt)")]
        yield_kt: f64,
    },
    /// List close-approaching asteroids
    Asteroids {
        #[arg(long, help = "Read a saved NeoWs feed instead of the live service")]
        feed: Option<PathBuf>,
        #[arg(long, help = "First day of the window (YYYY-MM-DD), default today")]
        start: Option<CalendarDate>,
    },
    /// Send one request through the JSON boundary
    Request {
        method: String,
        path: String,
        body: Option<String>,
        #[arg(long, help = "Serve the catalog from a saved NeoWs feed")]
        feed: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PayloadKind {
    Dart,
    Kinetic,
    Nuclear,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Impact { diameter, velocity } => {
            let service = ImpactSimulationService::from_config(&config);
            let result = service.simulate(&ImpactRequest {
                diameter_m: diameter,
                velocity_km_s: velocity,
            })?;
            let data = json!({
                "mass_kg": result.mass_kg,
                "energy_joules": result.energy_joules,
                "energy_megatons": result.energy_megatons,
                "crater_diameter_km": result.crater_diameter_km,
                "seismic_magnitude": result.seismic_magnitude,
            });
            print_one(cli.json, data, |_| {
                format!(
                    "energy\t{:.2} Mt\ncrater\t{:.2} km\nseismic\t{:.1}",
                    result.energy_megatons, result.crater_diameter_km, result.seismic_magnitude
                )
            })?;
        }
        Commands::Deflect {
            miss_distance,
            velocity,
            delta_v,
            payload,
            diameter,
            impactor_mass,
            beta,
            impactor_velocity,
            yield_kt,
        } => {
            let service = DeflectionSimulationService::from_config(&config);
            let (delta_v, result) = match (delta_v, payload, diameter) {
                (_, Some(kind), Some(diameter)) => {
                    let payload = match kind {
                        PayloadKind::Dart => DeflectionPayload::dart(),
                        PayloadKind::Kinetic => DeflectionPayload::kinetic(impactor_mass, beta),
                        PayloadKind::Nuclear => DeflectionPayload::nuclear(yield_kt),
                    };
                    log::info!("Deflecting with {}", payload.description());
                    service.simulate_payload(
                        miss_distance,
                        velocity,
                        diameter,
                        &payload,
                        impactor_velocity,
                    )?
                }
                (Some(delta_v), _, _) => {
                    let result = service.simulate(&DeflectionRequest {
                        miss_distance_km: miss_distance,
                        velocity_km_s: velocity,
                        delta_v_m_s: delta_v,
                    })?;
                    (delta_v, result)
                }
                _ => anyhow::bail!("either --delta-v or --payload with --diameter is required"),
            };
            let data = json!({
                "delta_v_m_s": delta_v,
                "new_miss_distance_km": result.new_miss_distance_km,
                "displacement_km": result.displacement_km,
                "outcome": result.outcome.label(),
            });
            print_one(cli.json, data, |_| {
                format!(
                    "delta-v\t{delta_v:.6} m/s\nnew miss\t{} km\noutcome\t{}",
                    result.new_miss_distance_km,
                    result.outcome.label()
                )
            })?;
        }
        Commands::Asteroids { feed, start } => {
            let source = catalog_source(&config, feed, start)?;
            let catalog = Catalog::new();
            let snapshot = catalog
                .refresh(source.as_ref())
                .with_context(|| format!("loading catalog from {}", source.describe()))?;
            print_out(cli.json, snapshot.records(), |r| {
                format!(
                    "{}\t{}\t{:.1} m\t{:.2} km/s\t{:.0} km",
                    r.id, r.name, r.diameter_m, r.velocity_km_s, r.miss_distance_km
                )
            })?;
        }
        Commands::Request {
            method,
            path,
            body,
            feed,
        } => {
            let catalog = Arc::new(Catalog::new());
            if path.starts_with(aegis::api::ROUTE_ASTEROIDS) {
                let source = catalog_source(&config, feed, None)?;
                // A failed refresh is reported by the endpoint itself
                let _ = catalog.refresh(source.as_ref());
            }
            let api = Api::new(&config, catalog);
            let response = api.handle(&method, &path, body.as_deref().unwrap_or(""));
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "status": response.status,
                        "body": response.body,
                    }))?
                );
            } else {
                println!("{}", response.status);
                println!("{}", serde_json::to_string_pretty(&response.body)?);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(config.with_env_overrides())
}

#[cfg(feature = "neows")]
fn catalog_source(
    config: &EngineConfig,
    feed: Option<PathBuf>,
    start: Option<CalendarDate>,
) -> anyhow::Result<Box<dyn CatalogSource>> {
    use aegis::catalog::NeoWsClient;

    if let Some(path) = feed {
        return Ok(Box::new(FeedFile(path)));
    }
    let client = NeoWsClient::new(config.catalog.clone());
    let client = match start {
        Some(start) => client.starting(start),
        None => client,
    };
    Ok(Box::new(client))
}

#[cfg(not(feature = "neows"))]
fn catalog_source(
    _config: &EngineConfig,
    feed: Option<PathBuf>,
    _start: Option<CalendarDate>,
) -> anyhow::Result<Box<dyn CatalogSource>> {
    match feed {
        Some(path) => Ok(Box::new(FeedFile(path))),
        None => anyhow::bail!("built without the `neows` feature; pass --feed FILE"),
    }
}

fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

fn print_one<T: Serialize>(json: bool, data: T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}
