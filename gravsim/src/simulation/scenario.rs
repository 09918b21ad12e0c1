//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario<D>`) containing:
//! - a populated `World<D>` (sun, explicit bodies, random bodies, in that order)
//! - the driver settings (`RunConfig`)
//!
//! The dimension in the config must match `D`; callers pick `D` from
//! `cfg.world.dimension` before building.

use log::info;

use crate::configuration::config::{BodyConfig, ParametersConfig, RunConfig, ScenarioConfig};
use crate::error::{Error, Result};
use crate::simulation::params::Parameters;
use crate::simulation::vector::Vector;
use crate::simulation::world::{BodySpec, World};

#[derive(Debug, Clone)]
pub struct Scenario<const D: usize> {
    pub world: World<D>,
    pub run: RunConfig,
}

impl<const D: usize> Scenario<D> {
    pub fn build(cfg: ScenarioConfig) -> Result<Self> {
        if cfg.world.dimension != D {
            return Err(Error::DimensionMismatch {
                expected: D,
                found: cfg.world.dimension,
            });
        }

        let parameters = parameters_from_config(cfg.world.time_step_sec, &cfg.parameters);
        let mut world = World::with_seed(parameters, cfg.world.seed)?;

        if cfg.world.sun {
            world.add_sun()?;
        }
        for bc in &cfg.bodies {
            world.add_body(body_spec(bc)?)?;
        }
        world.spawn_random(cfg.world.n, cfg.world.spawn_extent, cfg.world.init_velocity)?;

        info!(
            "built {}D scenario: {} bodies, total mass {:.3}, dt {}",
            D,
            world.len(),
            world.total_mass(),
            world.params().dt
        );

        Ok(Self { world, run: cfg.run })
    }
}

/// Runtime parameters: defaults overridden by whatever the config sets
pub fn parameters_from_config(dt: f64, p_cfg: &ParametersConfig) -> Parameters {
    let defaults = Parameters::default();
    Parameters {
        dt,
        distance_scale: p_cfg.distance_scale.unwrap_or(defaults.distance_scale),
        collision_factor: p_cfg.collision_factor.unwrap_or(defaults.collision_factor),
        static_merge: p_cfg.static_merge.unwrap_or(defaults.static_merge),
    }
}

/// Map a `BodyConfig` to a `BodySpec`, checking vector arity against `D`
fn body_spec<const D: usize>(bc: &BodyConfig) -> Result<BodySpec<D>> {
    let position = Vector::from_slice(&bc.x)?;
    let velocity = match &bc.v {
        Some(v) => Vector::from_slice(v)?,
        None => Vector::zeros(),
    };
    Ok(BodySpec {
        position,
        velocity,
        mass: bc.m,
        is_static: bc.is_static,
    })
}
