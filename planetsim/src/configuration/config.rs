//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – update order and time-step controls
//! - [`ParametersConfig`] – physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section except `bodies` may be omitted, as may any field with a
//! default:
//!
//! ```yaml
//! engine:
//!   order: "snapshot"       # or "sequential"
//!   dt: 36000.0             # seconds per step
//!   min_dt: 0.0036          # floor when slowing down
//!   speed_factor: 10.0      # faster/slower multiplier
//!
//! parameters:
//!   G: 6.674e-11            # gravitational constant
//!   min_r2: 1.0e-5          # pairs closer than this exert no force
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     m: 1.989e30
//!     radius: 50
//!     color: "yellow"
//!   - x: [ 1.5e11, 0.0 ]
//!     m: 5.97e24
//!     radius: 12
//!     color: "green"
//!     orbital: true         # velocity from the circular-orbit helper
//! ```
//!
//! [`crate::simulation::scenario::Scenario::build_scenario`] maps this into
//! the runtime types and validates it.

use serde::Deserialize;

use crate::simulation::engine::{DEFAULT_DT, MIN_DT, SPEED_FACTOR};
use crate::simulation::params::{GRAVITATIONAL_CONSTANT, MIN_SEPARATION_SQUARED};

/// How forces relate to positions within one step
/// `order: "snapshot"` or `order: "sequential"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    #[serde(rename = "snapshot")] // Every force from start-of-step positions, then every body moves
    #[default]
    Snapshot,

    #[serde(rename = "sequential")] // Force then move, body by body; later bodies see earlier ones already moved
    Sequential,
}

/// Engine configuration: update order and time-step controls
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub order: UpdateOrder, // force/update ordering within a step
    pub dt: f64, // seconds per step
    pub min_dt: f64, // lower bound when slowing down
    pub speed_factor: f64, // faster/slower multiplier
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order: UpdateOrder::default(),
            dt: DEFAULT_DT,
            min_dt: MIN_DT,
            speed_factor: SPEED_FACTOR,
        }
    }
}

/// Physical constants for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub min_r2: f64, // squared distance below which a pair exerts no force
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: GRAVITATIONAL_CONSTANT,
            min_r2: MIN_SEPARATION_SQUARED,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position [x, y] in meters
    #[serde(default = "zero_velocity")]
    pub v: Vec<f64>, // Initial velocity [vx, vy] in m/s, at rest if omitted
    pub m: f64, // Mass in kg
    pub radius: f64, // Display radius, unrelated to mass
    #[serde(default)]
    pub color: Option<String>, // Palette name, blue if omitted
    #[serde(default)]
    pub orbital: bool, // Replace `v` with a circular orbit around the heaviest body
}

fn zero_velocity() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Update order and time-step controls
    #[serde(default)]
    pub parameters: ParametersConfig, // Physical constants
    pub bodies: Vec<BodyConfig>, // Bodies, in registry order
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
