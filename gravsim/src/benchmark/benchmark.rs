//! Wall-clock timing of the O(n²) core at the body counts it targets
//!
//! Output is CSV-like so it can be pasted into a spreadsheet.

use std::time::Instant;

use crate::error::Result;
use crate::simulation::body::{BodyId, MassiveBody};
use crate::simulation::collisions::CollisionGroups;
use crate::simulation::forces::PairwiseGravity;
use crate::simulation::params::Parameters;
use crate::simulation::vector::Vec2;
use crate::simulation::world::{BodySpec, World};

const SIZES: [usize; 6] = [25, 50, 100, 200, 400, 800];

/// Deterministic jittered grid, no rng needed; spacing keeps pairs apart
fn position(i: usize) -> Vec2 {
    let i_f = i as f64;
    let col = (i % 20) as f64;
    let row = (i / 20) as f64;
    Vec2::new([col * 5.0 + (i_f * 0.37).sin(), row * 5.0 + (i_f * 0.13).cos()])
}

/// Build a world of `n` unit-mass bodies at the benchmark positions
fn make_world(n: usize) -> Result<World<2>> {
    let mut world = World::with_seed(Parameters::default(), Some(42))?;
    for i in 0..n {
        world.add_body(BodySpec::at(position(i)).with_mass(1.0))?;
    }
    Ok(world)
}

/// Time a single force-accumulation sweep for growing `n`
pub fn bench_forces() -> Result<()> {
    let gravity = PairwiseGravity::from_params(&Parameters::default());

    println!("N,forces_ms");
    for n in SIZES {
        let bodies = (0..n)
            .map(|i| MassiveBody::new(BodyId(i as u64), position(i), Vec2::zeros(), 1.0, false))
            .collect::<Result<Vec<_>>>()?;
        let mut out = vec![Vec2::zeros(); n];

        // Warm up
        gravity.accumulate_accels(&bodies, &mut out, &mut CollisionGroups::new(n))?;

        let t0 = Instant::now();
        gravity.accumulate_accels(&bodies, &mut out, &mut CollisionGroups::new(n))?;
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{n},{ms:.6}");
    }
    Ok(())
}

/// Time full ticks (forces + merges + integration) for growing `n`
pub fn bench_advance(steps: usize) -> Result<()> {
    println!("N,advance_ms,bodies_after");
    for n in SIZES {
        let mut world = make_world(n)?;

        // Warm up
        world.step()?;

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step()?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps.max(1) as f64;

        println!("{n},{ms:.6},{}", world.len());
    }
    Ok(())
}
