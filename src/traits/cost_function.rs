use std::convert::Infallible;

use crate::{DVector, Float};

/// A trait which describes a fitness function $`f(\mathbb{R}^n) \to [0, \infty)`$, lower is
/// better.
///
/// Such a function may also take a `user_data: &U` field which can be used to pass external
/// arguments to the function during minimization. The function must be pure with respect to
/// global state: the engines call it many times per iteration and assume no side effects.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return
    /// a [`std::convert::Infallible`] if the function evaluation never fails. A returned error
    /// is always fatal to the run and never retried.
    fn evaluate(&self, x: &DVector<Float>, user_data: &U) -> Result<Float, E>;
}
