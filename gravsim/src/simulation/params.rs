//! Numerical and calibration parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt`,
//! - the distance scale and collision factor used only by the merge test,
//! - how merges that involve a static body are placed

use serde::Deserialize;

use crate::error::{Error, Result};

/// Upper bound on any body's mass. Construction clamps to this value.
pub const MAX_MASS: f64 = 100.0;

/// Default fixed timestep in seconds.
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Multiplier applied to the physical separation before it is compared with
/// the collision threshold.
///
/// It couples the simulation's length unit to the drawing unit the radii were
/// tuned against. The value is a calibration constant, not a derived one.
pub const DISTANCE_SCALE: f64 = 6500.0;

/// Multiplier applied to the summed radii of a pair to get the collision
/// threshold. Calibrated together with [`DISTANCE_SCALE`].
pub const COLLISION_FACTOR: f64 = 400.0;

/// Placement of a merge product when at least one member is static
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaticMerge {
    /// Keep the product where the static member(s) sit (mass-weighted over
    /// static members only), velocity zero
    #[default]
    #[serde(rename = "anchor")]
    Anchor,

    /// Pin the product to the world origin, velocity zero
    #[serde(rename = "origin")]
    Origin,
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub distance_scale: f64, // scaled distance = dist * distance_scale
    pub collision_factor: f64, // threshold = (r1 + r2) * collision_factor
    pub static_merge: StaticMerge,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_TIME_STEP,
            distance_scale: DISTANCE_SCALE,
            collision_factor: COLLISION_FACTOR,
            static_merge: StaticMerge::default(),
        }
    }
}

impl Parameters {
    /// Reject non-finite or non-positive values
    pub fn validate(&self) -> Result<()> {
        check_positive("dt", self.dt)?;
        check_positive("distance_scale", self.distance_scale)?;
        check_positive("collision_factor", self.collision_factor)?;
        Ok(())
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}
