use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::{utils::generate_random_vector, Bound, Error, Point, RandChoice},
    traits::CostFunction,
    DVector, Float,
};

/// The neighborhood structure that decides which position a particle is drawn toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Every particle is drawn toward the swarm-wide best position.
    #[default]
    Global,
    /// Each particle is drawn toward the best of its nearest neighbors in parameter space.
    Local,
    /// Every particle is drawn toward a focal particle sampled with weight inverse to its
    /// current fitness.
    Focal,
}

impl TryFrom<char> for Topology {
    type Error = Error;
    fn try_from(value: char) -> Result<Self, Error> {
        match value.to_ascii_uppercase() {
            'G' => Ok(Self::Global),
            'L' => Ok(Self::Local),
            'F' => Ok(Self::Focal),
            other => Err(Error::configuration(format!(
                "unknown topology '{other}' (expected 'G', 'L' or 'F')"
            ))),
        }
    }
}

/// The inertia-weight schedule applied to the velocity update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InertiaWeight {
    /// The same weight at every epoch (must lie in `[0, 1]`).
    Constant(Float),
    /// Linearly annealed from `start` at the first epoch toward `end`.
    Linear {
        /// The weight at epoch zero.
        start: Float,
        /// The weight approached as the epoch budget is spent.
        end: Float,
    },
}

impl Default for InertiaWeight {
    fn default() -> Self {
        Self::Constant(0.8)
    }
}

impl InertiaWeight {
    /// The weight in effect at the given epoch.
    pub fn at(&self, epoch: usize, max_epochs: usize) -> Float {
        match *self {
            Self::Constant(w) => w,
            Self::Linear { start, end } => {
                start + (end - start) * (epoch as Float) / (max_epochs as Float)
            }
        }
    }
}

/// What happens to a particle that leaves the search hypercube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Positions may wander outside the bound; only velocities are clamped.
    #[default]
    Free,
    /// Positions are clamped back onto the bound after every move.
    Clamp,
}

/// A single member of the swarm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particle {
    /// The particle's current position (with its evaluation, when present).
    pub position: Point<DVector<Float>>,
    /// The particle's velocity.
    pub velocity: DVector<Float>,
    /// The best position this particle has ever occupied.
    pub best: Point<DVector<Float>>,
    /// The particle's private random generator, reseeded on every initialization.
    #[serde(skip, default)]
    pub(crate) rng: Rng,
}

impl Particle {
    /// Draw a fresh particle with position and velocity uniform over the bound, using the
    /// particle's own generator.
    pub fn new(dimension: usize, bound: Bound, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let position = generate_random_vector(dimension, bound.lower, bound.upper, &mut rng);
        let velocity = generate_random_vector(dimension, bound.lower, bound.upper, &mut rng);
        Self {
            position: Point::from(position),
            velocity,
            best: Point::default(),
            rng,
        }
    }

    /// Evaluate the current position and fold it into the personal best.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
    ) -> Result<(), Error<E>> {
        self.position.evaluate(func, user_data)?;
        if self.position.total_cmp(&self.best).is_lt() {
            self.best = self.position.clone();
        }
        Ok(())
    }
}

/// The collection of particles explored by [`ParticleSwarm`](`super::ParticleSwarm`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swarm {
    /// The particles in the swarm.
    pub particles: Vec<Particle>,
}

impl Swarm {
    /// Spawn `n` particles over the bound. Particle `i` gets its own generator seeded with
    /// `base_seed + i + 1`, so swarms of different sizes stay reproducible independently.
    pub fn new(n: usize, dimension: usize, bound: Bound, base_seed: u64) -> Self {
        Self {
            particles: (0..n)
                .map(|i| Particle::new(dimension, bound, base_seed + i as u64 + 1))
                .collect(),
        }
    }

    /// The reference position for particle `i` under the local (ring-like) topology: among the
    /// `max(1, n / 10)` particles nearest to `i` in parameter space (self excluded), the current
    /// position of the one with the lowest current fitness.
    pub fn local_reference(&self, i: usize) -> DVector<Float> {
        let k = (self.particles.len() / 10).max(1);
        let here = &self.particles[i].position.x;
        let mut by_distance: Vec<(usize, Float)> = self
            .particles
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, p)| {
                let d: Float = here
                    .iter()
                    .zip(p.position.x.iter())
                    .map(|(a, b)| ((a - b) * (a - b)).sqrt())
                    .sum();
                (j, d)
            })
            .collect();
        by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
        by_distance
            .iter()
            .take(k)
            .map(|&(j, _)| &self.particles[j])
            .min_by(|a, b| a.position.total_cmp(&b.position))
            .map_or_else(|| here.clone(), |p| p.position.x.clone())
    }

    /// The reference position under the focal (wheel-like) topology: a particle drawn with
    /// weight inverse to its current fitness. A particle sitting exactly at fitness zero is
    /// returned outright rather than dividing by it.
    pub fn focal_reference(&self, rng: &mut Rng) -> DVector<Float> {
        if let Some(p) = self
            .particles
            .iter()
            .find(|p| p.position.fx == Some(0.0))
        {
            return p.position.x.clone();
        }
        let weights: Vec<Float> = self
            .particles
            .iter()
            .map(|p| 1.0 / p.position.fx_or_inf())
            .collect();
        rng.choice_weighted(&weights)
            .map_or_else(|| self.particles[0].position.x.clone(), |k| {
                self.particles[k].position.x.clone()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_topology_parses_from_char() {
        assert_eq!(Topology::try_from('G').unwrap(), Topology::Global);
        assert_eq!(Topology::try_from('l').unwrap(), Topology::Local);
        assert_eq!(Topology::try_from('f').unwrap(), Topology::Focal);
        assert!(matches!(
            Topology::try_from('X'),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_inertia_schedules() {
        let constant = InertiaWeight::Constant(0.7);
        assert_relative_eq!(constant.at(0, 10), 0.7);
        assert_relative_eq!(constant.at(9, 10), 0.7);
        let linear = InertiaWeight::Linear {
            start: 0.9,
            end: 0.4,
        };
        assert_relative_eq!(linear.at(0, 5), 0.9);
        assert_relative_eq!(linear.at(4, 5), 0.5);
    }

    #[test]
    fn test_particles_draw_from_their_own_generators() {
        let bound = Bound::new(-5.0, 5.0);
        let swarm_a = Swarm::new(8, 3, bound, 0);
        let swarm_b = Swarm::new(8, 3, bound, 0);
        for (a, b) in swarm_a.particles.iter().zip(swarm_b.particles.iter()) {
            assert_eq!(a.position.x, b.position.x);
            assert_eq!(a.velocity, b.velocity);
        }
        // a larger swarm reproduces the smaller one's leading particles
        let swarm_c = Swarm::new(12, 3, bound, 0);
        for (a, c) in swarm_a.particles.iter().zip(swarm_c.particles.iter()) {
            assert_eq!(a.position.x, c.position.x);
        }
        assert!(swarm_a
            .particles
            .iter()
            .all(|p| p.position.x.iter().all(|x| bound.contains(*x))));
    }

    #[test]
    fn test_local_reference_picks_best_neighbor() {
        let mut swarm = Swarm::new(20, 1, Bound::default(), 0);
        for (i, p) in swarm.particles.iter_mut().enumerate() {
            p.position.x = dvector![i as Float];
            p.position.fx = Some(100.0 - i as Float);
        }
        // neighbors of particle 5 are 4 and 6; 6 has the lower fitness
        let reference = swarm.local_reference(5);
        assert_eq!(reference, dvector![6.0]);
    }

    #[test]
    fn test_focal_reference_returns_zero_fitness_particle_outright() {
        let mut swarm = Swarm::new(5, 1, Bound::default(), 0);
        for p in swarm.particles.iter_mut() {
            p.position.fx = Some(1.0);
        }
        swarm.particles[3].position.fx = Some(0.0);
        swarm.particles[3].position.x = dvector![9.0];
        let mut rng = Rng::with_seed(0);
        assert_eq!(swarm.focal_reference(&mut rng), dvector![9.0]);
    }

    #[test]
    fn test_focal_reference_favors_low_fitness() {
        let mut swarm = Swarm::new(3, 1, Bound::default(), 0);
        for (i, p) in swarm.particles.iter_mut().enumerate() {
            p.position.x = dvector![i as Float];
        }
        swarm.particles[0].position.fx = Some(10.0);
        swarm.particles[1].position.fx = Some(0.1);
        swarm.particles[2].position.fx = Some(10.0);
        let mut rng = Rng::with_seed(1);
        let mut hits = 0;
        for _ in 0..1_000 {
            if swarm.focal_reference(&mut rng) == dvector![1.0] {
                hits += 1;
            }
        }
        assert!(hits > 800);
    }
}
