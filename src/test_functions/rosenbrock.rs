use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// The Rosenbrock function,
/// $`f(\vec{x}) = \sum_{i=1}^{n-1} \left[100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2\right]`$,
/// minimized at $`\vec{x} = \vec{1}`$ with $`f(\vec{1}) = 0`$. Its long curved valley makes it
/// a standard stress test for population optimizers.
pub struct Rosenbrock;

impl CostFunction for Rosenbrock {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok((0..x.len() - 1)
            .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
            .sum())
    }
}
