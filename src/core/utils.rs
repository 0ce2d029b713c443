use crate::{DMatrix, DVector, Float};
use fastrand::Rng;
use fastrand_contrib::RngExt;

pub(crate) fn generate_random_vector(
    dimension: usize,
    lb: Float,
    ub: Float,
    rng: &mut Rng,
) -> DVector<Float> {
    DVector::from_vec((0..dimension).map(|_| rng.range(lb, ub)).collect())
}

/// Normalizes each row of the given matrix so it sums to one.
///
/// Rows which sum to zero are left untouched; the transition-sampling fallback handles them.
pub fn row_normalize(matrix: &mut DMatrix<Float>) {
    for i in 0..matrix.nrows() {
        let sum: Float = matrix.row(i).iter().sum();
        if sum > 0.0 {
            matrix.row_mut(i).apply(|v| *v /= sum);
        }
    }
}

/// A helper trait to provide a weighted random choice method.
pub trait RandChoice {
    /// Return a random index sampled with the given weights.
    fn choice_weighted(&mut self, weights: &[Float]) -> Option<usize>;
}

impl RandChoice for Rng {
    fn choice_weighted(&mut self, weights: &[Float]) -> Option<usize> {
        let total_weight = weights.iter().sum();
        let u: Float = self.range(0.0, total_weight);
        let mut cumulative_weight = 0.0;
        for (index, &weight) in weights.iter().enumerate() {
            cumulative_weight += weight;
            if u <= cumulative_weight {
                return Some(index);
            }
        }
        None
    }
}

/// A helper trait to get feature-gated floating-point random values.
pub trait SampleFloat {
    /// Get a random value in a range.
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// Get a random value in the range `[0, 1)`.
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f32_range(lower..upper)
    }
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}
