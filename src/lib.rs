//! Aegis - Asteroid Impact and Deflection Engine
//!
//! A library crate computing impact consequences (energy, crater size,
//! seismic magnitude) and deflection outcomes for near-Earth objects, with a
//! JSON boundary for the front end and a NeoWs-backed asteroid catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod outcome;
pub mod physics;
pub mod simulation;
pub mod types;
pub mod units;

pub use error::{SimError, SimResult};

#[cfg(test)]
pub mod test_utils;
