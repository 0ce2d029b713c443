/// Implementation of the ant-colony optimizer.
pub mod aco;
/// Distance, pheromone, and transition-probability matrices.
pub mod matrices;
/// The enumerated discrete search space.
pub mod space;

pub use aco::{Ant, AntColony, ColonyStatus};
pub use matrices::{DistanceMatrix, PheromoneMatrix, ProbabilityMatrix};
pub use space::SearchSpace;
