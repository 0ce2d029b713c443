use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// The sphere function, $`f(\vec{x}) = \sum_i x_i^2`$, minimized at the origin with
/// $`f(\vec{0}) = 0`$.
pub struct Sphere;

impl CostFunction for Sphere {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok(x.iter().map(|xi| xi.powi(2)).sum())
    }
}
