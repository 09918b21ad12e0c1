pub mod vector;
pub mod params;
pub mod body;
pub mod forces;
pub mod collisions;
pub mod integrator;
pub mod world;
pub mod view;
pub mod scenario;
