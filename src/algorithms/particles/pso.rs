use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{BoundaryPolicy, InertiaWeight, Swarm, Topology},
    core::{Bound, Error, Point, RunSummary, SampleFloat},
    traits::{Algorithm, CostFunction, Status},
    DVector, Float,
};

/// The live state of a [`ParticleSwarm`] run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwarmStatus {
    /// The best position ever observed by any particle (monotonically improving).
    pub gbest: Point<DVector<Float>>,
    /// The swarm of particles.
    pub swarm: Swarm,
    /// One best-so-far entry per completed epoch.
    pub history: Vec<Point<DVector<Float>>>,
    /// A message containing information about the condition of the run.
    pub message: String,
    /// Whether the full epoch budget was spent.
    pub converged: bool,
    /// The number of fitness evaluations.
    pub n_f_evals: usize,
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        self.gbest = Point::default();
        self.swarm = Swarm::default();
        self.history.clear();
        self.message = String::new();
        self.converged = false;
        self.n_f_evals = 0;
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

/// Particle Swarm Optimizer over a bounded hypercube.
///
/// Every epoch each particle picks a reference position according to the swarm's [`Topology`],
/// updates its velocity
/// $`v \gets w v + c_1 r_1 (p_{\text{best}} - x) + c_2 r_2 (p_{\text{ref}} - x)`$
/// with fresh `r1, r2 ∈ [0, 1)` per dimension from the particle's own generator, clamps the
/// velocity to the search bound, and moves. Positions are free to leave the bound unless
/// [`BoundaryPolicy::Clamp`] is selected. The swarm runs for exactly
/// [`ParticleSwarm::with_max_epochs`] epochs.
#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    dimension: usize,
    n_particles: usize,
    bound: Bound,
    seed: u64,
    topology: Topology,
    inertia: InertiaWeight,
    c1: Float,
    c2: Float,
    max_epochs: usize,
    boundary: BoundaryPolicy,

    rng: Rng,
    epoch: usize,
}

impl ParticleSwarm {
    /// Construct a swarm over the given dimension with 50 particles, 100 epochs, a constant
    /// inertia weight of 0.8, `c1 = c2 = 2.05`, the global topology, free boundaries, the
    /// default bound and seed 0.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            n_particles: 50,
            bound: Bound::default(),
            seed: 0,
            topology: Topology::default(),
            inertia: InertiaWeight::default(),
            c1: 2.05,
            c2: 2.05,
            max_epochs: 100,
            boundary: BoundaryPolicy::default(),
            rng: Rng::with_seed(0),
            epoch: 0,
        }
    }
    /// Sets the search bound applied to every dimension.
    #[must_use]
    pub const fn with_bound(mut self, lower: Float, upper: Float) -> Self {
        self.bound = Bound::new(lower, upper);
        self
    }
    /// Sets the number of particles in the swarm.
    #[must_use]
    pub const fn with_n_particles(mut self, value: usize) -> Self {
        self.n_particles = value;
        self
    }
    /// Sets the fixed number of epochs to run.
    #[must_use]
    pub const fn with_max_epochs(mut self, value: usize) -> Self {
        self.max_epochs = value;
        self
    }
    /// Sets the seed of the swarm's random generators.
    #[must_use]
    pub const fn with_seed(mut self, value: u64) -> Self {
        self.seed = value;
        self
    }
    /// Sets the neighborhood topology.
    #[must_use]
    pub const fn with_topology(mut self, value: Topology) -> Self {
        self.topology = value;
        self
    }
    /// Sets the inertia-weight schedule.
    #[must_use]
    pub const fn with_inertia(mut self, value: InertiaWeight) -> Self {
        self.inertia = value;
        self
    }
    /// Sets the cognitive coefficient $`c_1`$.
    #[must_use]
    pub const fn with_c1(mut self, value: Float) -> Self {
        self.c1 = value;
        self
    }
    /// Sets the social coefficient $`c_2`$.
    #[must_use]
    pub const fn with_c2(mut self, value: Float) -> Self {
        self.c2 = value;
        self
    }
    /// Sets what happens to particles that leave the search bound.
    #[must_use]
    pub const fn with_boundary(mut self, value: BoundaryPolicy) -> Self {
        self.boundary = value;
        self
    }

    fn validate<E>(&self) -> Result<(), Error<E>> {
        if self.dimension == 0 {
            return Err(Error::configuration("dimension must be positive"));
        }
        if self.n_particles == 0 {
            return Err(Error::configuration("particle count must be positive"));
        }
        if self.max_epochs == 0 {
            return Err(Error::configuration("epoch count must be positive"));
        }
        if !self.bound.is_valid() {
            return Err(Error::configuration(format!(
                "invalid search bound {}",
                self.bound
            )));
        }
        if let InertiaWeight::Constant(w) = self.inertia {
            if !(0.0..=1.0).contains(&w) {
                return Err(Error::configuration(format!(
                    "inertia weight w = {w} must lie in [0, 1]"
                )));
            }
        }
        if !(self.c1 >= 0.0 && self.c1.is_finite() && self.c2 >= 0.0 && self.c2.is_finite()) {
            return Err(Error::configuration(format!(
                "acceleration coefficients c1 = {}, c2 = {} must be finite and non-negative",
                self.c1, self.c2
            )));
        }
        Ok(())
    }

    fn refresh_gbest(status: &mut SwarmStatus) {
        if let Some(best) = status
            .swarm
            .particles
            .iter()
            .min_by(|a, b| a.best.total_cmp(&b.best))
        {
            if best.best.total_cmp(&status.gbest).is_lt() {
                status.gbest = best.best.clone();
            }
        }
    }
}

impl<U, E> Algorithm<SwarmStatus, U, E> for ParticleSwarm {
    type Summary = RunSummary;

    fn initialize(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        self.validate()?;
        self.rng = Rng::with_seed(self.seed);
        self.epoch = 0;
        status.swarm = Swarm::new(self.n_particles, self.dimension, self.bound, self.seed);
        for particle in status.swarm.particles.iter_mut() {
            particle.evaluate(func, user_data)?;
            status.n_f_evals += 1;
        }
        Self::refresh_gbest(status);
        Ok(())
    }

    fn step(
        &mut self,
        _current_step: usize,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        let w = self.inertia.at(self.epoch, self.max_epochs);
        for i in 0..status.swarm.particles.len() {
            let reference = match self.topology {
                Topology::Global => status.gbest.x.clone(),
                Topology::Local => status.swarm.local_reference(i),
                Topology::Focal => status.swarm.focal_reference(&mut self.rng),
            };
            let particle = &mut status.swarm.particles[i];
            let mut position = particle.position.x.clone();
            for d in 0..self.dimension {
                let r1 = particle.rng.float();
                let r2 = particle.rng.float();
                let v = w * particle.velocity[d]
                    + self.c1 * r1 * (particle.best.x[d] - position[d])
                    + self.c2 * r2 * (reference[d] - position[d]);
                particle.velocity[d] = self.bound.clamp(v);
                position[d] += particle.velocity[d];
                if matches!(self.boundary, BoundaryPolicy::Clamp) {
                    position[d] = self.bound.clamp(position[d]);
                }
            }
            particle.position.set_position(position);
            particle.evaluate(func, user_data)?;
            status.n_f_evals += 1;
            // fold into the swarm-wide best immediately so later particles chase it
            if status.swarm.particles[i].best.total_cmp(&status.gbest).is_lt() {
                status.gbest = status.swarm.particles[i].best.clone();
            }
        }
        status.history.push(status.gbest.clone());
        self.epoch += 1;
        Ok(())
    }

    fn check_for_termination(
        &mut self,
        _func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> Result<bool, Error<E>> {
        if self.epoch >= self.max_epochs {
            status.update_message("epoch budget exhausted");
            status.converged = true;
            return Ok(true);
        }
        Ok(false)
    }

    fn summarize(&self, status: &SwarmStatus, _user_data: &U) -> Result<RunSummary, Error<E>> {
        Ok(RunSummary {
            x: status.gbest.x.iter().copied().collect(),
            fx: status.gbest.fx_or_inf(),
            history: status.history.clone(),
            message: status.message.clone(),
            converged: status.converged,
            n_f_evals: status.n_f_evals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Engine,
        test_functions::{Rastrigin, Rosenbrock, Sphere},
    };
    use nalgebra::dvector;

    #[test]
    fn test_global_swarm_minimizes_the_sphere() {
        let pso = ParticleSwarm::new(2)
            .with_bound(-5.0, 5.0)
            .with_n_particles(30)
            .with_max_epochs(50)
            .with_inertia(InertiaWeight::Constant(0.7))
            .with_c1(1.5)
            .with_c2(1.5)
            .with_seed(0);
        let mut engine = Engine::new(pso);
        engine.minimize(&Sphere).unwrap();
        assert_eq!(engine.result.history.len(), 50);
        assert!(engine.result.fx < 0.5);
        assert!(engine.result.converged);
        // initialization plus one full sweep per epoch
        assert_eq!(engine.result.n_f_evals, 30 + 30 * 50);
    }

    #[test]
    fn test_local_and_focal_topologies_make_progress() {
        for topology in [Topology::Local, Topology::Focal] {
            let pso = ParticleSwarm::new(2)
                .with_bound(-5.0, 5.0)
                .with_n_particles(30)
                .with_max_epochs(50)
                .with_topology(topology)
                .with_seed(1);
            let mut engine = Engine::new(pso);
            engine.minimize(&Rosenbrock).unwrap();
            let first = engine.result.history.first().unwrap().fx_or_inf();
            assert!(engine.result.fx < first);
        }
    }

    #[test]
    fn test_global_reference_is_the_swarm_wide_best() {
        // pin the swarm at x = 1 with a better gbest at the origin; with w = 0 and c1 = 0 the
        // only pull is toward the swarm-wide best, so every particle must move below 1
        let mut pso = ParticleSwarm::new(1)
            .with_bound(-5.0, 5.0)
            .with_n_particles(2)
            .with_inertia(InertiaWeight::Constant(0.0))
            .with_c1(0.0)
            .with_c2(1.0)
            .with_seed(0);
        let mut status = SwarmStatus::default();
        let func: &dyn CostFunction = &Sphere;
        pso.initialize(func, &mut status, &mut ()).unwrap();
        for p in status.swarm.particles.iter_mut() {
            p.position = Point {
                x: dvector![1.0],
                fx: Some(1.0),
            };
            p.best = p.position.clone();
            p.velocity = dvector![0.0];
        }
        status.gbest = Point {
            x: dvector![0.0],
            fx: Some(0.0),
        };
        pso.step(0, func, &mut status, &mut ()).unwrap();
        for p in &status.swarm.particles {
            assert!(
                p.position.x[0] < 1.0,
                "particle never moved toward the swarm-wide best: x = {}",
                p.position.x[0]
            );
        }
        // the pinned best at the origin is still the swarm-wide best afterwards
        assert_eq!(status.gbest.fx, Some(0.0));
    }

    #[test]
    fn test_invalid_inertia_weight_fails_before_any_epoch() {
        let pso = ParticleSwarm::new(2).with_inertia(InertiaWeight::Constant(1.5));
        let mut engine = Engine::new(pso);
        let err = engine.minimize(&Sphere).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(engine.status.history.is_empty());
        assert_eq!(engine.status.n_f_evals, 0);
    }

    #[test]
    fn test_invalid_bound_and_coefficients_are_rejected() {
        let pso = ParticleSwarm::new(2).with_bound(5.0, -5.0);
        let mut engine = Engine::new(pso);
        assert!(matches!(
            engine.minimize(&Sphere),
            Err(Error::Configuration(_))
        ));
        let pso = ParticleSwarm::new(2).with_c1(-1.0);
        let mut engine = Engine::new(pso);
        assert!(matches!(
            engine.minimize(&Sphere),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_velocities_stay_within_the_bound() {
        let pso = ParticleSwarm::new(3)
            .with_bound(-2.0, 2.0)
            .with_n_particles(20)
            .with_max_epochs(30)
            .with_seed(5);
        let mut engine = Engine::new(pso);
        engine.minimize(&Rastrigin).unwrap();
        assert!(engine
            .status
            .swarm
            .particles
            .iter()
            .all(|p| p.velocity.iter().all(|v| (-2.0..=2.0).contains(v))));
    }

    #[test]
    fn test_clamped_positions_stay_within_the_bound() {
        let pso = ParticleSwarm::new(2)
            .with_bound(-1.0, 1.0)
            .with_n_particles(15)
            .with_max_epochs(25)
            .with_boundary(BoundaryPolicy::Clamp)
            .with_seed(2);
        let mut engine = Engine::new(pso);
        engine.minimize(&Rastrigin).unwrap();
        assert!(engine
            .status
            .swarm
            .particles
            .iter()
            .all(|p| p.position.x.iter().all(|x| (-1.0..=1.0).contains(x))));
    }

    #[test]
    fn test_fixed_seed_runs_are_bit_identical() {
        let run = || {
            let pso = ParticleSwarm::new(2)
                .with_bound(-5.0, 5.0)
                .with_n_particles(25)
                .with_max_epochs(40)
                .with_seed(123);
            let mut engine = Engine::new(pso);
            engine.minimize(&Rosenbrock).unwrap();
            (engine.result.x.clone(), engine.result.fx)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_best_so_far_is_monotonically_non_increasing() {
        let pso = ParticleSwarm::new(2)
            .with_bound(-5.0, 5.0)
            .with_max_epochs(60)
            .with_inertia(InertiaWeight::Linear {
                start: 0.9,
                end: 0.4,
            })
            .with_seed(7);
        let mut engine = Engine::new(pso);
        engine.minimize(&Rastrigin).unwrap();
        let fitnesses: Vec<Float> = engine.result.history.iter().map(Point::fx_or_inf).collect();
        assert!(fitnesses.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_objective_failure_leaves_partial_history() {
        struct FailsAfter(std::cell::Cell<usize>);
        impl CostFunction<(), String> for FailsAfter {
            fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, String> {
                let n = self.0.get();
                if n >= 80 {
                    return Err("sensor went dark".to_string());
                }
                self.0.set(n + 1);
                Ok(x.iter().map(|xi| xi.powi(2)).sum())
            }
        }
        let pso = ParticleSwarm::new(2)
            .with_bound(-5.0, 5.0)
            .with_n_particles(10)
            .with_max_epochs(50)
            .with_seed(0);
        let mut engine = Engine::new(pso);
        let err = engine.minimize(&FailsAfter(std::cell::Cell::new(0))).unwrap_err();
        assert!(matches!(err, Error::Objective(ref msg) if msg == "sensor went dark"));
        // seven full epochs completed before the eighth failed
        assert_eq!(engine.status.history.len(), 7);
    }
}
