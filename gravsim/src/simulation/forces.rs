//! Pairwise attraction and collision flagging for the n-body world
//!
//! One O(n²) sweep over unordered pairs does two jobs:
//! - pairs closer than the collision threshold are unioned into
//!   [`CollisionGroups`] and exert no force on each other this tick,
//! - every other pair contributes inverse-square accelerations of equal and
//!   opposite momentum change.
//!
//! There is no gravitational constant; it is folded into the mass unit.

use crate::error::Result;
use crate::simulation::body::MassiveBody;
use crate::simulation::collisions::CollisionGroups;
use crate::simulation::params::Parameters;
use crate::simulation::vector::Vector;

/// Newtonian-style attraction with merge-on-contact
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    pub distance_scale: f64, // scales separation for the collision test only
    pub collision_factor: f64, // scales summed radii into the threshold
}

impl PairwiseGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            distance_scale: params.distance_scale,
            collision_factor: params.collision_factor,
        }
    }

    /// Strict less-than: a pair exactly on the threshold does not collide
    fn collides(&self, dist: f64, ri: f64, rj: f64) -> bool {
        dist * self.distance_scale < (ri + rj) * self.collision_factor
    }

    /// Compute accelerations for every body in `bodies`
    /// - `out[i]` is zeroed, then receives the sum of contributions on body `i`
    /// - colliding pairs are recorded in `collisions` (indices into `bodies`)
    /// - static bodies keep a zero entry but still pull on the others
    pub fn accumulate_accels<const D: usize>(
        &self,
        bodies: &[MassiveBody<D>],
        out: &mut [Vector<D>],
        collisions: &mut CollisionGroups,
    ) -> Result<()> {
        for a in out.iter_mut() {
            *a = Vector::zeros();
        }

        let n = bodies.len();
        // Loop over each unordered pair (i, j) with i < j; no self pairs
        for i in 0..n {
            let bi = &bodies[i];
            let xi = bi.position();
            let mi = bi.mass();

            for j in (i + 1)..n {
                let bj = &bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.position() - xi;
                let r2 = r.magnitude_squared();
                let dist = r2.sqrt();

                if self.collides(dist, bi.radius(), bj.radius()) {
                    collisions.union(i, j);
                    continue;
                }

                // r / |r|^3
                let factor = r.div(r2 * dist)?;

                if !bi.is_static() {
                    out[i] = out[i] + factor * bj.mass();
                }
                if !bj.is_static() {
                    out[j] = out[j] - factor * mi;
                }
            }
        }
        Ok(())
    }
}
