use approx::{assert_abs_diff_eq, assert_relative_eq};

use gravsim::simulation::body::{radius_for_mass, BodyId, MassiveBody};
use gravsim::{BodySpec, CollisionGroups, Error, PairwiseGravity, Parameters, Scenario, ScenarioConfig, StaticMerge, Vec2, Vec3, World, MAX_MASS};

/// Build a 2-body world separated along the x-axis, both at rest
pub fn two_body_world(dist: f64, m1: f64, m2: f64) -> (World<2>, BodyId, BodyId) {
    let mut world = World::with_seed(Parameters::default(), Some(42)).unwrap();
    let a = world.add_body(BodySpec::at(Vec2::new([-dist / 2.0, 0.0])).with_mass(m1)).unwrap();
    let b = world.add_body(BodySpec::at(Vec2::new([dist / 2.0, 0.0])).with_mass(m2)).unwrap();
    (world, a, b)
}

/// Parameters where the collision threshold is simply r1 + r2
pub fn unit_calibration() -> Parameters {
    Parameters {
        distance_scale: 1.0,
        collision_factor: 1.0,
        ..Parameters::default()
    }
}

fn scenario_2d(yaml: &str) -> Scenario<2> {
    Scenario::build(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap()
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn two_bodies_fall_toward_each_other() {
    let (mut world, a, b) = two_body_world(10.0, 10.0, 10.0);
    let a0 = world.find(a).unwrap().position();
    let b0 = world.find(b).unwrap().position();

    world.advance(0.1).unwrap();

    let ba = world.find(a).unwrap().clone();
    let bb = world.find(b).unwrap().clone();

    // velocities point toward the other body, equal in magnitude
    assert!(ba.velocity()[0] > 0.0);
    assert!(bb.velocity()[0] < 0.0);
    assert_eq!(ba.velocity()[1], 0.0);
    assert_relative_eq!(ba.velocity().magnitude(), bb.velocity().magnitude(), epsilon = 1e-15);

    // a = m / d^2 = 0.1, v = a dt = 0.01, x moves by v dt
    assert_relative_eq!(ba.velocity()[0], 0.01, epsilon = 1e-12);
    assert_relative_eq!(ba.position()[0] - a0[0], ba.velocity()[0] * 0.1, epsilon = 1e-12);
    assert_relative_eq!(bb.position()[0] - b0[0], bb.velocity()[0] * 0.1, epsilon = 1e-12);

    let d0 = (b0 - a0).magnitude();
    let d1 = (bb.position() - ba.position()).magnitude();
    assert!(d1 < d0, "distance did not shrink: {d0} -> {d1}");

    // and keeps shrinking
    world.advance(0.1).unwrap();
    let d2 = (world.find(b).unwrap().position() - world.find(a).unwrap().position()).magnitude();
    assert!(d2 < d1);
}

#[test]
fn pairwise_accelerations_are_momentum_symmetric() {
    let bodies = [
        MassiveBody::new(BodyId(0), Vec2::new([-3.0, 2.0]), Vec2::zeros(), 4.0, false).unwrap(),
        MassiveBody::new(BodyId(1), Vec2::new([6.0, -1.0]), Vec2::zeros(), 9.0, false).unwrap(),
    ];
    let gravity = PairwiseGravity::from_params(&Parameters::default());
    let mut acc = vec![Vec2::zeros(); 2];
    let mut groups = CollisionGroups::new(2);
    gravity.accumulate_accels(&bodies, &mut acc, &mut groups).unwrap();

    let p1 = acc[0] * bodies[0].mass();
    let p2 = acc[1] * bodies[1].mass();
    assert_abs_diff_eq!(p1[0], -p2[0], epsilon = 1e-15);
    assert_abs_diff_eq!(p1[1], -p2[1], epsilon = 1e-15);
}

#[test]
fn gravity_inverse_square_law() {
    let (mut near, a, _) = two_body_world(2.0, 1.0, 1.0);
    let (mut far, c, _) = two_body_world(4.0, 1.0, 1.0);
    near.advance(0.1).unwrap();
    far.advance(0.1).unwrap();

    let ratio = near.find(a).unwrap().velocity().magnitude() / far.find(c).unwrap().velocity().magnitude();
    assert_relative_eq!(ratio, 4.0, epsilon = 1e-9);
}

#[test]
fn single_body_has_no_self_interaction() {
    let mut world = World::with_seed(Parameters::default(), Some(1)).unwrap();
    let id = world
        .add_body(BodySpec::at(Vec2::new([1.0, 2.0])).with_velocity(Vec2::new([0.5, 0.0])).with_mass(5.0))
        .unwrap();

    world.advance(0.1).unwrap();

    let b = world.find(id).unwrap();
    assert_eq!(b.velocity(), Vec2::new([0.5, 0.0]));
    assert_relative_eq!(b.position()[0], 1.05, epsilon = 1e-15);

    // the accumulator itself stays zero for a lone body
    let gravity = PairwiseGravity::from_params(&Parameters::default());
    let mut acc = vec![Vec2::new([9.0, 9.0])];
    let mut groups = CollisionGroups::new(1);
    gravity.accumulate_accels(std::slice::from_ref(b), &mut acc, &mut groups).unwrap();
    assert!(acc[0].is_zero());
    assert!(!groups.has_collisions());
}

// ==================================================================================
// Static body tests
// ==================================================================================

#[test]
fn static_body_is_bit_identical_across_ticks() {
    let mut world = World::with_seed(Parameters::default(), Some(5)).unwrap();
    let sun = world.add_body(BodySpec::at(Vec2::new([0.25, -0.5])).with_mass(80.0).fixed()).unwrap();
    world.add_body(BodySpec::at(Vec2::new([30.0, 0.0])).with_mass(1.0)).unwrap();
    world.add_body(BodySpec::at(Vec2::new([0.0, -25.0])).with_mass(2.0)).unwrap();

    let before = world.find(sun).unwrap().clone();
    for _ in 0..50 {
        world.advance(0.1).unwrap();
    }
    let after = world.find(sun).unwrap();

    assert_eq!(after.position(), before.position());
    assert_eq!(after.velocity(), before.velocity());
    assert!(after.velocity().is_zero());
}

#[test]
fn static_body_still_attracts() {
    let mut world = World::with_seed(Parameters::default(), Some(5)).unwrap();
    world.add_sun().unwrap();
    let rock = world.add_body(BodySpec::at(Vec2::new([20.0, 0.0])).with_mass(1.0)).unwrap();
    world.advance(0.1).unwrap();
    assert!(world.find(rock).unwrap().velocity()[0] < 0.0);
}

#[test]
fn merge_with_static_stays_static() {
    let mut world = World::with_seed(Parameters::default(), Some(5)).unwrap();
    let sun = world.add_body(BodySpec::at(Vec2::new([2.0, 3.0])).with_mass(50.0).fixed()).unwrap();
    let rock = world
        .add_body(BodySpec::at(Vec2::new([2.1, 3.0])).with_velocity(Vec2::new([4.0, 0.0])).with_mass(1.0))
        .unwrap();

    let report = world.advance(0.1).unwrap();
    assert_eq!(report.merges.len(), 1);
    assert!(!world.contains(sun) && !world.contains(rock));

    let merged = world.bodies().next().unwrap();
    assert!(merged.is_static);
    assert_eq!(merged.position, Vec2::new([2.0, 3.0]));
    assert_eq!(merged.mass, 51.0);
}

#[test]
fn origin_policy_pins_static_merges() {
    let params = Parameters {
        static_merge: StaticMerge::Origin,
        ..Parameters::default()
    };
    let mut world = World::with_seed(params, Some(5)).unwrap();
    world.add_body(BodySpec::at(Vec2::new([2.0, 3.0])).with_mass(50.0).fixed()).unwrap();
    world.add_body(BodySpec::at(Vec2::new([2.1, 3.0])).with_mass(1.0)).unwrap();

    world.advance(0.1).unwrap();
    let merged = world.bodies().next().unwrap();
    assert!(merged.is_static);
    assert!(merged.position.is_zero());
}

// ==================================================================================
// Collision / merge tests
// ==================================================================================

#[test]
fn close_bodies_merge_into_one_fresh_body() {
    let (mut world, a, b) = two_body_world(0.05, 3.0, 4.0);

    let report = world.advance(0.1).unwrap();

    assert_eq!(world.len(), 1);
    let merged = world.bodies().next().unwrap();
    assert_ne!(merged.id, a);
    assert_ne!(merged.id, b);
    assert_eq!(merged.mass, 7.0);
    assert!(!world.contains(a));
    assert!(!world.contains(b));
    assert_eq!(report.merges[0].product, merged.id);
}

#[test]
fn merge_product_mass_is_clamped() {
    let (mut world, a, b) = two_body_world(0.01, 80.0, 70.0);
    assert_eq!(world.total_mass(), 150.0);

    let report = world.advance(0.1).unwrap();

    assert_eq!(report.merges.len(), 1);
    assert_eq!(report.merges[0].mass, MAX_MASS);
    assert!(!world.contains(a) && !world.contains(b));

    let merged = world.bodies().next().unwrap();
    assert_eq!(merged.mass, MAX_MASS);
    assert_relative_eq!(merged.radius, radius_for_mass(MAX_MASS), epsilon = 1e-12);
    assert_eq!(world.total_mass(), MAX_MASS);
}

#[test]
fn merge_conserves_mass_and_momentum() {
    let mut world = World::with_seed(Parameters::default(), Some(3)).unwrap();
    world
        .add_body(BodySpec::at(Vec2::new([0.0, 0.0])).with_velocity(Vec2::new([1.0, 0.0])).with_mass(2.0))
        .unwrap();
    world
        .add_body(BodySpec::at(Vec2::new([0.02, 0.01])).with_velocity(Vec2::new([-0.5, 1.0])).with_mass(3.0))
        .unwrap();

    let m0 = world.total_mass();
    let p0 = world.total_momentum();

    let report = world.advance(0.1).unwrap();
    assert_eq!(report.merges.len(), 1);

    assert_eq!(world.total_mass(), m0);
    let p1 = world.total_momentum();
    assert_abs_diff_eq!(p1[0], p0[0], epsilon = 1e-12);
    assert_abs_diff_eq!(p1[1], p0[1], epsilon = 1e-12);
}

#[test]
fn chained_contacts_merge_transitively() {
    // a-b and b-c touch, a-c do not: still one group
    let mut world = World::with_seed(unit_calibration(), Some(3)).unwrap();
    let ids: Vec<BodyId> = [0.0, 1.5, 3.0]
        .iter()
        .map(|&x| world.add_body(BodySpec::at(Vec2::new([x, 0.0])).with_mass(1.0)).unwrap())
        .collect();

    let report = world.advance(0.1).unwrap();

    assert_eq!(report.merges.len(), 1);
    assert_eq!(report.merges[0].absorbed, ids);
    assert_eq!(world.len(), 1);
    assert_eq!(world.total_mass(), 3.0);
}

#[test]
fn independent_groups_resolve_separately() {
    let mut world = World::with_seed(unit_calibration(), Some(3)).unwrap();
    for x in [0.0, 1.0, 100.0, 101.0, 50.0] {
        world.add_body(BodySpec::at(Vec2::new([x, 0.0])).with_mass(1.0)).unwrap();
    }

    let report = world.advance(0.1).unwrap();

    assert_eq!(report.merges.len(), 2);
    assert_eq!(world.len(), 3);
    assert_eq!(world.total_mass(), 5.0);
    let mut masses: Vec<f64> = world.bodies().map(|v| v.mass).collect();
    masses.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(masses, vec![1.0, 2.0, 2.0]);
}

#[test]
fn exact_threshold_is_not_a_collision() {
    // unit masses have radius 1, threshold is exactly 2
    let mut world = World::with_seed(unit_calibration(), Some(3)).unwrap();
    world.add_body(BodySpec::at(Vec2::new([0.0, 0.0])).with_mass(1.0)).unwrap();
    world.add_body(BodySpec::at(Vec2::new([2.0, 0.0])).with_mass(1.0)).unwrap();

    let report = world.advance(0.1).unwrap();
    assert!(report.merges.is_empty());
    assert_eq!(world.len(), 2);
}

#[test]
fn merged_ids_keep_increasing() {
    let (mut world, a, b) = two_body_world(0.01, 1.0, 1.0);
    world.advance(0.1).unwrap();
    let merged = world.bodies().next().unwrap().id;
    assert!(merged > a && merged > b);

    let next = world.add_body(BodySpec::at(Vec2::new([40.0, 0.0])).with_mass(1.0)).unwrap();
    assert!(next > merged);
}

// ==================================================================================
// Enumeration / determinism tests
// ==================================================================================

#[test]
fn enumeration_is_restartable() {
    let s = scenario_2d("world: { n: 12, seed: 9 }");
    let first: Vec<_> = s.world.bodies().collect();
    let second: Vec<_> = s.world.bodies().collect();
    assert_eq!(first, second);
    assert_eq!(s.world.bodies().len(), 12);

    let it = s.world.bodies();
    let replay = it.clone();
    assert_eq!(it.count(), replay.count());
}

#[test]
fn identical_inputs_give_identical_runs() {
    let yaml = "world: { n: 40, sun: true, seed: 2024, init_velocity: 0.8 }";
    let mut a = scenario_2d(yaml);
    let mut b = scenario_2d(yaml);

    for _ in 0..60 {
        a.world.advance(0.05).unwrap();
        b.world.advance(0.05).unwrap();
    }

    let va: Vec<_> = a.world.bodies().collect();
    let vb: Vec<_> = b.world.bodies().collect();
    assert_eq!(va, vb);
}

#[test]
fn dimension_contract_on_untyped_input() {
    assert!(matches!(
        Vec2::from_slice(&[1.0, 2.0, 3.0]),
        Err(Error::DimensionMismatch { expected: 2, found: 3 })
    ));
    assert!(matches!(
        Vec3::from_slice(&[1.0, 2.0]),
        Err(Error::DimensionMismatch { expected: 3, found: 2 })
    ));
}

#[test]
fn three_dimensional_world_runs() {
    let mut world = World::<3>::with_seed(Parameters::default(), Some(8)).unwrap();
    world.add_body(BodySpec::at(Vec3::new([0.0, 0.0, -4.0])).with_mass(5.0)).unwrap();
    world.add_body(BodySpec::at(Vec3::new([0.0, 0.0, 4.0])).with_mass(5.0)).unwrap();

    world.advance(0.1).unwrap();

    let zs: Vec<f64> = world.bodies().map(|v| v.position[2]).collect();
    assert!(zs[0] > -4.0 && zs[1] < 4.0);
}
