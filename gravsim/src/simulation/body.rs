//! Point-mass bodies and their identity.
//!
//! A [`MassiveBody`] carries position, velocity, the acceleration accumulated
//! during the current tick, and a mass from which its collision radius is
//! derived. Ids come from an [`IdAllocator`] owned by the world, so every
//! world has its own strictly increasing sequence.

use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::simulation::params::MAX_MASS;
use crate::simulation::vector::Vector;

/// Process-unique (per world) body identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing [`BodyId`]s
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }
}

/// Collision radius for a given mass: radius of a unit-density sphere.
/// Monotonic in mass; not used by the force law.
#[inline]
pub fn radius_for_mass(mass: f64) -> f64 {
    mass.cbrt()
}

/// Uniform random mass in `(0, MAX_MASS]`
pub fn random_mass<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // random::<f64>() is in [0, 1); flip it so zero is excluded and MAX_MASS included
    MAX_MASS * (1.0 - rng.random::<f64>())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassiveBody<const D: usize> {
    id: BodyId,
    position: Vector<D>,
    velocity: Vector<D>,
    acceleration: Vector<D>,
    mass: f64,
    radius: f64,
    is_static: bool,
}

impl<const D: usize> MassiveBody<D> {
    /// Create a body after validating its invariants.
    ///
    /// Mass above [`MAX_MASS`] is clamped. Acceleration starts at zero.
    ///
    /// Errors:
    /// - `Error::InvalidMass` if `mass` is non-positive or not finite
    /// - `Error::InvalidParam` if position or velocity has a non-finite component
    pub fn new(
        id: BodyId,
        position: Vector<D>,
        velocity: Vector<D>,
        mass: f64,
        is_static: bool,
    ) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidMass(mass));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let mass = mass.min(MAX_MASS);
        // static bodies never move
        let velocity = if is_static { Vector::zeros() } else { velocity };

        Ok(Self {
            id,
            position,
            velocity,
            acceleration: Vector::zeros(),
            mass,
            radius: radius_for_mass(mass),
            is_static,
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn position(&self) -> Vector<D> {
        self.position
    }

    pub fn velocity(&self) -> Vector<D> {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector<D> {
        self.acceleration
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Linear momentum m * v
    pub fn momentum(&self) -> Vector<D> {
        self.velocity * self.mass
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Add to the accumulated acceleration. Static bodies ignore it.
    pub(crate) fn accelerate(&mut self, delta: Vector<D>) {
        if !self.is_static {
            self.acceleration = self.acceleration + delta;
        }
    }

    pub(crate) fn reset_acceleration(&mut self) {
        self.acceleration = Vector::zeros();
    }

    /// Explicit Euler step; static bodies are left untouched
    pub(crate) fn integrate(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        self.velocity = self.velocity + self.acceleration * dt;
        self.position = self.position + self.velocity * dt;
    }
}
