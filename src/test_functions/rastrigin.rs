use crate::{traits::CostFunction, DVector, Float, PI};
use std::convert::Infallible;

/// The Rastrigin function,
/// $`f(\vec{x}) = 10 n + \sum_i \left[x_i^2 - 10 \cos(2 \pi x_i)\right]`$,
/// minimized at the origin with $`f(\vec{0}) = 0`$. Highly multimodal, with a regular lattice
/// of local minima.
pub struct Rastrigin;

impl CostFunction for Rastrigin {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok(10.0 * x.len() as Float
            + x.iter()
                .map(|xi| xi.powi(2) - 10.0 * Float::cos(2.0 * PI * xi))
                .sum::<Float>())
    }
}
