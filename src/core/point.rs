use crate::{core::Error, traits::CostFunction, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Describes a point in parameter space that can be used in
/// [`Algorithm`](`crate::traits::Algorithm`)s.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point<I> {
    /// The point's position.
    pub x: I,
    /// The point's evaluation (`None` if the point has not yet been evaluated).
    pub fx: Option<Float>,
}

impl<I> Point<I> {
    /// Compare two points by their `fx` value, treating unevaluated points as worse than
    /// evaluated ones.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(s), Some(o)) => s.total_cmp(o),
        }
    }
    /// Move the point to a new position, resetting the evaluation of the point.
    pub fn set_position(&mut self, x: I) {
        self.x = x;
        self.fx = None;
    }
    /// Get the current evaluation of the point, or infinity if it has not been evaluated.
    pub fn fx_or_inf(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
}

impl Point<DVector<Float>> {
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the
    /// result. Does nothing if the point has already been evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Objective`] if the evaluation fails and [`Error::Numeric`] if it
    /// produces a NaN or infinite value.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
    ) -> Result<(), Error<E>> {
        if self.fx.is_none() {
            let fx = func.evaluate(&self.x, user_data).map_err(Error::Objective)?;
            if !fx.is_finite() {
                return Err(Error::numeric(format!("fitness evaluated to {fx}")));
            }
            self.fx = Some(fx);
        }
        Ok(())
    }
}

impl<I: Debug> Display for Point<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {:?}", self.x, self.fx)
    }
}

impl From<&[Float]> for Point<DVector<Float>> {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point<DVector<Float>> {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point<DVector<Float>> {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
impl<I> PartialEq for Point<I> {
    fn eq(&self, other: &Self) -> bool {
        self.fx == other.fx
    }
}
impl<I> PartialOrd for Point<I> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.fx.partial_cmp(&other.fx)
    }
}
