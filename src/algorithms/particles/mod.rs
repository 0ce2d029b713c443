/// Implementation of the particle-swarm optimizer.
pub mod pso;
/// Particles, swarms, topologies, and the velocity-update schedules.
pub mod swarm;

pub use pso::{ParticleSwarm, SwarmStatus};
pub use swarm::{BoundaryPolicy, InertiaWeight, Particle, Swarm, Topology};
