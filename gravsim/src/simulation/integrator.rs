//! Fixed-step time integrator for the n-body world
//!
//! Explicit (forward) Euler driven by the acceleration each body accumulated
//! during the current tick.

use super::body::MassiveBody;

/// Advance every movable body by one step of size `dt`, then clear all
/// accumulated accelerations for the next tick
/// - v_n+1 = v_n + dt * a_n
/// - x_n+1 = x_n + dt * v_n+1
///
/// Static bodies are skipped, so their position and velocity never change.
pub fn euler_integrator<const D: usize>(bodies: &mut [MassiveBody<D>], dt: f64) {
    for b in bodies.iter_mut() {
        b.integrate(dt);
        b.reset_acceleration();
    }
}
