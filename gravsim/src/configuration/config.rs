//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WorldConfig`]      – dimension, random population, sun, timestep, seed
//! - [`ParametersConfig`] – optional overrides of the calibration constants
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`RunConfig`]        – how long the driver runs and how often it reports
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid (empty) 2D
//! scenario.
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! world:
//!   dimension: 2            # 2 or 3
//!   n: 40                   # random bodies to spawn
//!   sun: true               # static body of MAX_MASS at the origin
//!   init_velocity: 0.5      # random velocity scale, omit for rest
//!   time_step_sec: 0.1      # fixed step size
//!   seed: 42                # omit for a fresh random seed
//!   spawn_extent: 10.0      # positions uniform in [-extent, extent]
//!
//! parameters:
//!   distance_scale: 6500.0
//!   collision_factor: 400.0
//!   static_merge: "anchor"  # or "origin"
//!
//! bodies:
//!   - x: [ -5.0, 0.0 ]
//!     v: [  0.0, 0.0 ]
//!     m: 10.0
//!   - x: [  5.0, 0.0 ]
//!     m: 10.0
//!     is_static: true
//!
//! run:
//!   ticks: 200
//!   report_every: 20
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{StaticMerge, DEFAULT_TIME_STEP};

/// World construction options
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub dimension: usize, // number of spatial components per vector
    pub n: usize, // initial random body count
    pub sun: bool, // add a static central body
    pub init_velocity: Option<f64>, // random initial velocity scale, None = at rest
    pub time_step_sec: f64, // fixed dt used by `World::step`
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
    pub spawn_extent: f64, // half-width of the spawn box
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dimension: 2,
            n: 0,
            sun: false,
            init_velocity: None,
            time_step_sec: DEFAULT_TIME_STEP,
            seed: None,
            spawn_extent: 10.0,
        }
    }
}

/// Optional overrides of the calibration parameters
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub distance_scale: Option<f64>,
    pub collision_factor: Option<f64>,
    pub static_merge: Option<StaticMerge>,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, one entry per dimension
    #[serde(default)]
    pub v: Option<Vec<f64>>, // initial velocity, zero when omitted
    #[serde(default)]
    pub m: Option<f64>, // mass, random in (0, MAX_MASS] when omitted
    #[serde(default)]
    pub is_static: bool,
}

/// Driver settings for the bundled binary
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub ticks: u64,
    pub report_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 100,
            report_every: 10,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
    pub run: RunConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
