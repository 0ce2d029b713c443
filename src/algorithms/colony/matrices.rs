use crate::{
    core::{row_normalize, RandChoice},
    DMatrix, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// The asymmetric "difficulty" distances between vertices, discovered lazily.
///
/// Each entry starts undiscovered (an explicit flag, not a floating sentinel) and is written at
/// most once; a discovered value is never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistanceMatrix {
    values: DMatrix<Float>,
    known: DMatrix<bool>,
}

impl DistanceMatrix {
    /// Create an all-undiscovered matrix over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            values: DMatrix::zeros(n, n),
            known: DMatrix::from_element(n, n, false),
        }
    }

    /// Whether the directed pair `(i, j)` has been discovered.
    pub fn is_known(&self, i: usize, j: usize) -> bool {
        self.known[(i, j)]
    }

    /// The discovered distance for `(i, j)`, if any.
    pub fn get(&self, i: usize, j: usize) -> Option<Float> {
        self.known[(i, j)].then(|| self.values[(i, j)])
    }

    /// Record a discovered distance. Entries are write-once.
    pub fn set(&mut self, i: usize, j: usize, value: Float) {
        debug_assert!(!self.known[(i, j)], "distance ({i}, {j}) already discovered");
        self.values[(i, j)] = value;
        self.known[(i, j)] = true;
    }

    /// The largest discovered distance, if any entry has been discovered.
    pub fn max_known(&self) -> Option<Float> {
        self.values
            .iter()
            .zip(self.known.iter())
            .filter(|(_, &k)| k)
            .map(|(&v, _)| v)
            .reduce(Float::max)
    }

    /// A dense copy with every undiscovered entry substituted by the current maximum discovered
    /// distance, keeping downstream divisions well-defined.
    pub fn resolved(&self) -> DMatrix<Float> {
        let max = self.max_known().unwrap_or(1.0);
        DMatrix::from_fn(self.values.nrows(), self.values.ncols(), |i, j| {
            if self.known[(i, j)] {
                self.values[(i, j)]
            } else {
                max
            }
        })
    }
}

/// The accumulated desirability of each directed vertex-to-vertex transition.
///
/// Initialized to one everywhere, decayed by `rho` each tour and reinforced by every ant that
/// traversed the edge; entries stay non-negative.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PheromoneMatrix(DMatrix<Float>);

impl PheromoneMatrix {
    /// Create an all-ones matrix over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self(DMatrix::from_element(n, n, 1.0))
    }

    /// The pheromone level of the directed edge `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Float {
        self.0[(i, j)]
    }

    /// Apply one tour's evaporation and deposits:
    /// $`T_{ij} \gets (1 - \rho) T_{ij} + \sum_k Q / D_{ij}`$ over each ant's traversed edge,
    /// deposits accumulating when several ants share an edge.
    pub fn evaporate_and_deposit(
        &mut self,
        rho: Float,
        q: Float,
        edges: &[(usize, usize)],
        distances: &DMatrix<Float>,
    ) {
        self.0.apply(|t| *t *= 1.0 - rho);
        for &(i, j) in edges {
            self.0[(i, j)] += q / distances[(i, j)];
        }
    }

    pub(crate) const fn inner(&self) -> &DMatrix<Float> {
        &self.0
    }
}

/// The row-stochastic transition distribution combining pheromone and distance.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProbabilityMatrix(DMatrix<Float>);

impl ProbabilityMatrix {
    /// Create an all-zero matrix over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self(DMatrix::zeros(n, n))
    }

    /// The transition probability of the directed edge `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Float {
        self.0[(i, j)]
    }

    /// Recompute $`P_{ij} = T_{ij}^\alpha / D_{ij}^\beta`$ elementwise, then row-normalize so
    /// each row sums to one. A row without positive entries is left as-is; the sampling
    /// fallback in [`ProbabilityMatrix::sample_transition`] handles it.
    pub fn recompute(
        &mut self,
        pheromone: &PheromoneMatrix,
        distances: &DMatrix<Float>,
        alpha: Float,
        beta: Float,
    ) {
        let t = pheromone.inner();
        self.0 = DMatrix::from_fn(t.nrows(), t.ncols(), |i, j| {
            t[(i, j)].powf(alpha) / distances[(i, j)].powf(beta)
        });
        row_normalize(&mut self.0);
    }

    /// Sample the next vertex for an ant sitting at `from`.
    ///
    /// Draws proportionally to the positive entries of the row, re-normalized over just the
    /// positive subset; if the row offers no positive move, falls back to a uniform draw over
    /// the whole vertex set so the ant never deadlocks.
    pub fn sample_transition(&self, from: usize, rng: &mut Rng) -> usize {
        let positive: Vec<(usize, Float)> = self
            .0
            .row(from)
            .iter()
            .enumerate()
            .filter(|(_, &p)| p > 0.0)
            .map(|(j, &p)| (j, p))
            .collect();
        if positive.is_empty() {
            return rng.usize(0..self.0.ncols());
        }
        let weights: Vec<Float> = positive.iter().map(|&(_, p)| p).collect();
        rng.choice_weighted(&weights)
            .map_or_else(|| rng.usize(0..self.0.ncols()), |k| positive[k].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fastrand::Rng;

    #[test]
    fn test_distance_entries_are_write_once() {
        let mut d = DistanceMatrix::new(3);
        assert!(!d.is_known(0, 1));
        assert_eq!(d.get(0, 1), None);
        d.set(0, 1, 2.5);
        assert!(d.is_known(0, 1));
        assert_eq!(d.get(0, 1), Some(2.5));
        assert!(!d.is_known(1, 0));
    }

    #[test]
    fn test_resolved_substitutes_max_known() {
        let mut d = DistanceMatrix::new(2);
        d.set(0, 1, 3.0);
        d.set(1, 0, 1.0);
        assert_eq!(d.max_known(), Some(3.0));
        let resolved = d.resolved();
        assert_eq!(resolved[(0, 0)], 3.0);
        assert_eq!(resolved[(1, 1)], 3.0);
        assert_eq!(resolved[(0, 1)], 3.0);
        assert_eq!(resolved[(1, 0)], 1.0);
    }

    #[test]
    fn test_resolved_with_nothing_known() {
        let d = DistanceMatrix::new(2);
        assert_eq!(d.max_known(), None);
        assert!(d.resolved().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_pheromone_evaporation_and_shared_edge_deposit() {
        let mut t = PheromoneMatrix::new(2);
        let distances = DMatrix::from_element(2, 2, 1.0);
        // two ants traverse (0, 1), one traverses (1, 0)
        t.evaporate_and_deposit(0.5, 1.0, &[(0, 1), (0, 1), (1, 0)], &distances);
        assert_relative_eq!(t.get(0, 1), 2.5);
        assert_relative_eq!(t.get(1, 0), 1.5);
        assert_relative_eq!(t.get(0, 0), 0.5);
        assert_relative_eq!(t.get(1, 1), 0.5);
    }

    #[test]
    fn test_probability_rows_sum_to_one_for_random_inputs() {
        let mut rng = Rng::with_seed(17);
        let n = 8;
        let mut pheromone = PheromoneMatrix::new(n);
        let distances = DMatrix::from_fn(n, n, |_, _| 0.1 + rng.f64() * 5.0);
        pheromone.evaporate_and_deposit(0.3, 2.0, &[(0, 1), (3, 4), (3, 4)], &distances);
        let mut p = ProbabilityMatrix::new(n);
        p.recompute(&pheromone, &distances, 1.0, 2.0);
        for i in 0..n {
            let row_sum: Float = (0..n).map(|j| p.get(i, j)).sum();
            assert_relative_eq!(row_sum, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_sample_transition_weighted_rows() {
        let mut pheromone = PheromoneMatrix::new(3);
        let distances = DMatrix::from_element(3, 3, 1.0);
        pheromone.evaporate_and_deposit(0.0, 5.0, &[(0, 2)], &distances);
        let mut p = ProbabilityMatrix::new(3);
        p.recompute(&pheromone, &distances, 1.0, 1.0);
        let mut rng = Rng::with_seed(3);
        let mut counts = [0usize; 3];
        for _ in 0..3_000 {
            counts[p.sample_transition(0, &mut rng)] += 1;
        }
        // the reinforced edge dominates the row
        assert!(counts[2] > counts[0]);
        assert!(counts[2] > counts[1]);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_zero_row_falls_back_to_uniform_draw() {
        let p = ProbabilityMatrix::new(4);
        let mut rng = Rng::with_seed(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let next = p.sample_transition(2, &mut rng);
            assert!(next < 4);
            seen[next] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
