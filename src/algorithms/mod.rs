/// Module containing the ant-colony graph-search engine.
pub mod colony;
/// Module containing the particle-swarm engine.
pub mod particles;

pub use colony::AntColony;
pub use particles::ParticleSwarm;
