use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::colony::{DistanceMatrix, PheromoneMatrix, ProbabilityMatrix, SearchSpace},
    core::{Error, Point, RunSummary, SampleFloat},
    traits::{Algorithm, CostFunction, Status},
    DVector, Float,
};

/// A stateful walker over the discrete search-space graph.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ant {
    /// The vertex the ant currently occupies.
    pub current: usize,
    /// The vertex the ant occupied before its last move, identifying the edge to reinforce.
    pub previous: usize,
}

/// The live state of an [`AntColony`] run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColonyStatus {
    /// The best candidate vector ever observed (monotonically improving).
    pub best: Point<DVector<Float>>,
    /// One best-so-far entry per completed tour.
    pub history: Vec<Point<DVector<Float>>>,
    /// The vertex occupied by each ant, recorded per tour across the whole colony.
    pub tours: Vec<Vec<usize>>,
    /// A message containing information about the condition of the run.
    pub message: String,
    /// Whether the full tour budget was spent.
    pub converged: bool,
    /// The number of fitness evaluations.
    pub n_f_evals: usize,
}

impl Status for ColonyStatus {
    fn reset(&mut self) {
        self.best = Point::default();
        self.history.clear();
        self.tours.clear();
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

/// Ant Colony Optimizer over an enumerated grid of candidate vectors.
///
/// Each tour the colony lazily discovers pairwise "difficulty" distances from fitness ratios,
/// evaporates and reinforces the pheromone matrix along the edges the ants traversed, rebuilds
/// the row-stochastic transition matrix $`P_{ij} = T_{ij}^\alpha / D_{ij}^\beta`$, and moves
/// every ant by a weighted draw over its current row. The tour's representative solution is the
/// vertex most frequently occupied across the colony (ties broken by lowest index), which
/// updates the all-time best. The colony runs for exactly [`AntColony::with_tours`] tours.
#[derive(Debug, Clone)]
pub struct AntColony {
    axes: Vec<Vec<Float>>,
    n_ants: usize,
    n_tours: usize,
    alpha: Float,
    beta: Float,
    rho: Float,
    q: Float,
    seed: u64,

    space: SearchSpace,
    distances: DistanceMatrix,
    pheromone: PheromoneMatrix,
    probability: ProbabilityMatrix,
    ants: Vec<Ant>,
    rng: Rng,
    tours_done: usize,
}

impl AntColony {
    /// Construct a colony over the grid spanned by the given per-dimension discrete domains,
    /// with 10 ants, 20 tours, `alpha = beta = 1`, `rho = 0.5`, `Q = 1` and seed 0.
    pub fn new(axes: Vec<Vec<Float>>) -> Self {
        Self {
            axes,
            n_ants: 10,
            n_tours: 20,
            alpha: 1.0,
            beta: 1.0,
            rho: 0.5,
            q: 1.0,
            seed: 0,
            space: SearchSpace::default(),
            distances: DistanceMatrix::default(),
            pheromone: PheromoneMatrix::default(),
            probability: ProbabilityMatrix::default(),
            ants: Vec::new(),
            rng: Rng::with_seed(0),
            tours_done: 0,
        }
    }
    /// Sets the number of ants in the colony.
    #[must_use]
    pub const fn with_n_ants(mut self, value: usize) -> Self {
        self.n_ants = value;
        self
    }
    /// Sets the fixed number of tours to run.
    #[must_use]
    pub const fn with_tours(mut self, value: usize) -> Self {
        self.n_tours = value;
        self
    }
    /// Sets the pheromone exponent $`\alpha`$ of the transition matrix.
    #[must_use]
    pub const fn with_alpha(mut self, value: Float) -> Self {
        self.alpha = value;
        self
    }
    /// Sets the distance exponent $`\beta`$ of the transition matrix.
    #[must_use]
    pub const fn with_beta(mut self, value: Float) -> Self {
        self.beta = value;
        self
    }
    /// Sets the evaporation fraction $`\rho`$ (must lie in `[0, 1]`).
    #[must_use]
    pub const fn with_rho(mut self, value: Float) -> Self {
        self.rho = value;
        self
    }
    /// Sets the deposit scale $`Q`$.
    #[must_use]
    pub const fn with_q(mut self, value: Float) -> Self {
        self.q = value;
        self
    }
    /// Sets the seed of the colony's random generator.
    #[must_use]
    pub const fn with_seed(mut self, value: u64) -> Self {
        self.seed = value;
        self
    }

    /// The lazily discovered distance matrix.
    pub const fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
    /// The ants and their current/previous vertices.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    fn validate<E>(&self) -> Result<(), Error<E>> {
        if self.n_ants == 0 {
            return Err(Error::configuration("ant count must be positive"));
        }
        if self.n_tours == 0 {
            return Err(Error::configuration("tour count must be positive"));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(Error::configuration(format!(
                "evaporation fraction rho = {} must lie in [0, 1]",
                self.rho
            )));
        }
        // a negative Q would drive pheromone entries negative
        if !(self.q.is_finite() && self.q >= 0.0) {
            return Err(Error::configuration(format!(
                "deposit scale Q = {} must be finite and non-negative",
                self.q
            )));
        }
        if !(self.alpha.is_finite() && self.beta.is_finite()) {
            return Err(Error::configuration(format!(
                "transition exponents alpha = {}, beta = {} must be finite",
                self.alpha, self.beta
            )));
        }
        Ok(())
    }

    fn eval_vertex<U, E>(
        &self,
        index: usize,
        func: &dyn CostFunction<U, E>,
        status: &mut ColonyStatus,
        user_data: &U,
    ) -> Result<Float, Error<E>> {
        let fx = func
            .evaluate(&self.space.vertex(index), user_data)
            .map_err(Error::Objective)?;
        status.n_f_evals += 1;
        if !fx.is_finite() {
            return Err(Error::numeric(format!(
                "fitness of vertex {index} evaluated to {fx}"
            )));
        }
        Ok(fx)
    }

    /// For each ant at vertex `i`, draw as many candidate partners `j` as there are ants and
    /// compute both directed distances of any undiscovered pair:
    /// $`D_{ij} = e^{(C_j - C_i)/C_i} (1 + u/10)`$, `u ∈ [0, 1)`, and the reverse with roles
    /// swapped. Discovered entries are never recomputed.
    fn discover_distances<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut ColonyStatus,
        user_data: &U,
    ) -> Result<(), Error<E>> {
        let n = self.space.n_vertices();
        for k in 0..self.ants.len() {
            let i = self.ants[k].current;
            let mut fitness_i = None;
            for _ in 0..self.ants.len() {
                let j = self.rng.usize(0..n);
                if self.distances.is_known(i, j) {
                    continue;
                }
                let ci = match fitness_i {
                    Some(v) => v,
                    None => {
                        let v = self.eval_vertex(i, func, status, user_data)?;
                        fitness_i = Some(v);
                        v
                    }
                };
                if ci == 0.0 {
                    return Err(Error::numeric(format!(
                        "cannot derive a transition difficulty from zero-fitness vertex {i}"
                    )));
                }
                let cj = self.eval_vertex(j, func, status, user_data)?;
                let forward = Float::exp((cj - ci) / ci);
                self.distances
                    .set(i, j, forward * (1.0 + self.rng.float() / 10.0));
                // only the backward direction divides by the partner's fitness
                if !self.distances.is_known(j, i) {
                    if cj == 0.0 {
                        return Err(Error::numeric(format!(
                            "cannot derive a transition difficulty from zero-fitness vertex {j}"
                        )));
                    }
                    let backward = Float::exp((ci - cj) / cj);
                    self.distances
                        .set(j, i, backward * (1.0 + self.rng.float() / 10.0));
                }
            }
        }
        Ok(())
    }

    /// The vertex most frequently occupied across the colony, ties broken by lowest index.
    fn representative_vertex(&self) -> usize {
        let mut counts = vec![0usize; self.space.n_vertices()];
        for ant in &self.ants {
            counts[ant.current] += 1;
        }
        let mut best = 0;
        for (vertex, &count) in counts.iter().enumerate() {
            if count > counts[best] {
                best = vertex;
            }
        }
        best
    }
}

impl<U, E> Algorithm<ColonyStatus, U, E> for AntColony {
    type Summary = RunSummary;

    fn initialize(
        &mut self,
        _func: &dyn CostFunction<U, E>,
        _status: &mut ColonyStatus,
        _user_data: &mut U,
    ) -> Result<(), Error<E>> {
        self.validate()?;
        self.space = SearchSpace::build(&self.axes)?;
        let n = self.space.n_vertices();
        self.distances = DistanceMatrix::new(n);
        self.pheromone = PheromoneMatrix::new(n);
        self.probability = ProbabilityMatrix::new(n);
        self.ants = vec![Ant::default(); self.n_ants];
        self.rng = Rng::with_seed(self.seed);
        self.tours_done = 0;
        Ok(())
    }

    fn step(
        &mut self,
        _current_step: usize,
        func: &dyn CostFunction<U, E>,
        status: &mut ColonyStatus,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        self.discover_distances(func, status, user_data)?;
        let resolved = self.distances.resolved();
        let edges: Vec<(usize, usize)> = self.ants.iter().map(|a| (a.previous, a.current)).collect();
        self.pheromone
            .evaporate_and_deposit(self.rho, self.q, &edges, &resolved);
        self.probability
            .recompute(&self.pheromone, &resolved, self.alpha, self.beta);
        let Self {
            ants,
            probability,
            rng,
            ..
        } = self;
        for ant in ants.iter_mut() {
            let next = probability.sample_transition(ant.current, rng);
            ant.previous = ant.current;
            ant.current = next;
        }
        status
            .tours
            .push(self.ants.iter().map(|a| a.current).collect());
        let representative = self.representative_vertex();
        let fx = self.eval_vertex(representative, func, status, user_data)?;
        if status.best.fx.map_or(true, |best| fx < best) {
            status.best = Point {
                x: self.space.vertex(representative),
                fx: Some(fx),
            };
        }
        status.history.push(status.best.clone());
        self.tours_done += 1;
        Ok(())
    }

    fn check_for_termination(
        &mut self,
        _func: &dyn CostFunction<U, E>,
        status: &mut ColonyStatus,
        _user_data: &mut U,
    ) -> Result<bool, Error<E>> {
        if self.tours_done >= self.n_tours {
            status.update_message("tour budget exhausted");
            status.converged = true;
            return Ok(true);
        }
        Ok(false)
    }

    fn summarize(&self, status: &ColonyStatus, _user_data: &U) -> Result<RunSummary, Error<E>> {
        Ok(RunSummary {
            x: status.best.x.iter().copied().collect(),
            fx: status.best.fx_or_inf(),
            history: status.history.clone(),
            message: status.message.clone(),
            converged: status.converged,
            n_f_evals: status.n_f_evals,
        })
    }
}
