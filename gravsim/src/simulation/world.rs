//! The simulation world: owner of the live body set and the tick loop.
//!
//! One call to [`World::advance`] runs a full tick:
//! 1. clear accumulated accelerations,
//! 2. pairwise forces + collision flagging ([`PairwiseGravity`]),
//! 3. merge every collision group into a single fresh body,
//! 4. explicit Euler integration of the survivors.
//!
//! The world is single-threaded and synchronous. `advance` takes `&mut self`,
//! so no enumeration can overlap a tick in progress.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::simulation::body::{random_mass, BodyId, IdAllocator, MassiveBody};
use crate::simulation::collisions::{merge_group, CollisionGroups};
use crate::simulation::forces::PairwiseGravity;
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::{check_positive, Parameters, MAX_MASS};
use crate::simulation::vector::Vector;
use crate::simulation::view::{Bodies, BodyView};

/// Description of a body to add; the world assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec<const D: usize> {
    pub position: Vector<D>,
    pub velocity: Vector<D>,
    pub mass: Option<f64>, // None draws a random mass in (0, MAX_MASS]
    pub is_static: bool,
}

impl<const D: usize> BodySpec<D> {
    pub fn at(position: Vector<D>) -> Self {
        Self {
            position,
            velocity: Vector::zeros(),
            mass: None,
            is_static: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector<D>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// One collision group resolved during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    pub absorbed: Vec<BodyId>,
    pub product: BodyId,
    pub mass: f64,
}

/// Summary of a completed tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    pub tick: u64,
    pub merges: Vec<MergeEvent>,
}

#[derive(Debug, Clone)]
pub struct World<const D: usize> {
    bodies: Vec<MassiveBody<D>>,
    ids: IdAllocator,
    params: Parameters,
    gravity: PairwiseGravity,
    rng: StdRng,
    accels: Vec<Vector<D>>, // per-tick scratch, one entry per body
    t: f64,
    ticks: u64,
}

impl<const D: usize> World<D> {
    /// Empty world; random masses come from an entropy-seeded generator
    pub fn new(params: Parameters) -> Result<Self> {
        Self::with_seed(params, None)
    }

    /// Empty world with a reproducible generator when `seed` is given
    pub fn with_seed(params: Parameters, seed: Option<u64>) -> Result<Self> {
        params.validate()?;
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };
        Ok(Self {
            bodies: Vec::new(),
            ids: IdAllocator::new(),
            gravity: PairwiseGravity::from_params(&params),
            params,
            rng,
            accels: Vec::new(),
            t: 0.0,
            ticks: 0,
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Simulated time elapsed
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Add a body and return its freshly allocated id
    pub fn add_body(&mut self, spec: BodySpec<D>) -> Result<BodyId> {
        let mass = match spec.mass {
            Some(m) => m,
            None => random_mass(&mut self.rng),
        };
        let id = self.ids.allocate();
        let body = MassiveBody::new(id, spec.position, spec.velocity, mass, spec.is_static)?;
        self.insert(body)?;
        Ok(id)
    }

    /// Static body of mass `MAX_MASS` at the origin
    pub fn add_sun(&mut self) -> Result<BodyId> {
        self.add_body(BodySpec::at(Vector::zeros()).with_mass(MAX_MASS).fixed())
    }

    /// Add `n` movable bodies with random masses, positions uniform in
    /// `[-extent, extent]` per axis and, when `init_velocity` is given,
    /// velocity components uniform in `[-v, v]`
    pub fn spawn_random(&mut self, n: usize, extent: f64, init_velocity: Option<f64>) -> Result<Vec<BodyId>> {
        check_positive("extent", extent)?;
        if let Some(v) = init_velocity {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "init_velocity must be finite and >= 0, got {v}"
                )));
            }
        }

        let mut ids = Vec::with_capacity(n);
        for _ in 0..n {
            let mut x = [0.0_f64; D];
            x.iter_mut().for_each(|c| *c = self.rng.random_range(-extent..=extent));

            let mut v = [0.0_f64; D];
            if let Some(scale) = init_velocity {
                v.iter_mut().for_each(|c| *c = scale * self.rng.random_range(-1.0..=1.0));
            }

            ids.push(self.add_body(BodySpec::at(Vector::new(x)).with_velocity(Vector::new(v)))?);
        }
        Ok(ids)
    }

    /// Read-only snapshots of the live bodies
    pub fn bodies(&self) -> Bodies<'_, D> {
        Bodies::new(&self.bodies)
    }

    pub fn body(&self, id: BodyId) -> Option<BodyView<D>> {
        self.find(id).map(BodyView::from)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.find(id).is_some()
    }

    /// Full body state, including velocity and the current acceleration
    pub fn find(&self, id: BodyId) -> Option<&MassiveBody<D>> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Σ m v over all live bodies
    pub fn total_momentum(&self) -> Vector<D> {
        self.bodies.iter().fold(Vector::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Advance by the configured timestep
    pub fn step(&mut self) -> Result<TickReport> {
        self.advance(self.params.dt)
    }

    /// Advance the world by one tick of length `dt`
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `dt` is not finite and > 0
    /// - `Error::UnknownBody` / `Error::DuplicateId` if the merge pass would
    ///   break the live-set invariants; the world should be discarded
    pub fn advance(&mut self, dt: f64) -> Result<TickReport> {
        check_positive("dt", dt)?;

        for b in self.bodies.iter_mut() {
            b.reset_acceleration();
        }

        let n = self.bodies.len();
        self.accels.clear();
        self.accels.resize(n, Vector::zeros());
        let mut collisions = CollisionGroups::new(n);

        self.gravity.accumulate_accels(&self.bodies, &mut self.accels, &mut collisions)?;
        for (b, a) in self.bodies.iter_mut().zip(self.accels.iter()) {
            b.accelerate(*a);
        }

        let merges = if collisions.has_collisions() {
            self.resolve_merges(collisions.groups())?
        } else {
            Vec::new()
        };

        euler_integrator(&mut self.bodies, dt);

        self.t += dt;
        self.ticks += 1;
        trace!("tick {} done: t = {:.3}, {} bodies", self.ticks, self.t, self.bodies.len());

        Ok(TickReport {
            tick: self.ticks,
            merges,
        })
    }

    /// Replace each group (indices into `self.bodies`) by one merged body
    fn resolve_merges(&mut self, groups: Vec<Vec<usize>>) -> Result<Vec<MergeEvent>> {
        let n = self.bodies.len();
        let mut absorbed = vec![false; n];
        let mut products = Vec::with_capacity(groups.len());
        let mut events = Vec::with_capacity(groups.len());

        for group in &groups {
            let mut members = Vec::with_capacity(group.len());
            for &i in group {
                if i >= n || absorbed[i] {
                    return Err(Error::UnknownBody(format!("index {i} in merge group {group:?}")));
                }
                absorbed[i] = true;
                members.push(&self.bodies[i]);
            }

            let id = self.ids.allocate();
            let merged = merge_group(id, &members, self.params.static_merge)?;
            let absorbed_ids: Vec<BodyId> = members.iter().map(|b| b.id()).collect();

            debug!(
                "merged {:?} into {} (mass {:.3}, static {})",
                absorbed_ids,
                id,
                merged.mass(),
                merged.is_static()
            );

            events.push(MergeEvent {
                absorbed: absorbed_ids,
                product: id,
                mass: merged.mass(),
            });
            products.push(merged);
        }

        let mut idx = 0;
        self.bodies.retain(|_| {
            let keep = !absorbed[idx];
            idx += 1;
            keep
        });

        for merged in products {
            self.insert(merged)?;
        }

        for event in &events {
            if let Some(stale) = event.absorbed.iter().find(|id| self.contains(**id)) {
                return Err(Error::UnknownBody(format!("{stale} survived its merge")));
            }
        }

        Ok(events)
    }

    fn insert(&mut self, body: MassiveBody<D>) -> Result<()> {
        if self.contains(body.id()) {
            return Err(Error::DuplicateId(body.id()));
        }
        self.bodies.push(body);
        Ok(())
    }
}
