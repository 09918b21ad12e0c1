pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::vector::{Vector, Vec2, Vec3};
pub use simulation::body::{BodyId, IdAllocator, MassiveBody};
pub use simulation::params::{Parameters, StaticMerge, MAX_MASS, DISTANCE_SCALE, COLLISION_FACTOR, DEFAULT_TIME_STEP};
pub use simulation::forces::PairwiseGravity;
pub use simulation::collisions::CollisionGroups;
pub use simulation::integrator::euler_integrator;
pub use simulation::world::{World, BodySpec, MergeEvent, TickReport};
pub use simulation::view::{BodyView, Bodies};
pub use simulation::scenario::Scenario;

pub use configuration::config::{WorldConfig, ParametersConfig, BodyConfig, RunConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_forces, bench_advance};
