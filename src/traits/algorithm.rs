use std::convert::Infallible;

use crate::{
    core::Error,
    traits::{CostFunction, Status},
};

/// A trait representing an iterative optimization algorithm.
///
/// This trait is implemented for the engines found in the [`algorithms`](crate::algorithms)
/// module, and contains all the methods needed to be run by an
/// [`Engine`](crate::core::Engine).
pub trait Algorithm<S: Status, U = (), E = Infallible> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;

    /// Any setup work done before the main steps of the algorithm should be done here. This is
    /// also where the configuration is validated and every random generator is (re)seeded, so
    /// that repeated runs of the same engine are reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an invalid configuration, before any iteration
    /// runs, and propagates evaluation failures as [`Error::Objective`]/[`Error::Numeric`].
    fn initialize(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut S,
        user_data: &mut U,
    ) -> Result<(), Error<E>>;

    /// The main "step" of an algorithm, which is repeated until
    /// [`Algorithm::check_for_termination`] reports the iteration budget is spent.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures as [`Error::Objective`]/[`Error::Numeric`].
    fn step(
        &mut self,
        current_step: usize,
        func: &dyn CostFunction<U, E>,
        status: &mut S,
        user_data: &mut U,
    ) -> Result<(), Error<E>>;

    /// Returns `true` once the algorithm's fixed iteration budget has been spent. The engines
    /// in this crate have no early-stop criterion; a caller wanting one should use an
    /// [`Observer`](`crate::traits::Observer`) instead.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures as [`Error::Objective`]/[`Error::Numeric`].
    fn check_for_termination(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut S,
        user_data: &mut U,
    ) -> Result<bool, Error<E>>;

    /// Runs any steps needed by the [`Algorithm`] after termination. This will run regardless
    /// of whether the iteration budget was fully spent.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures as [`Error::Objective`]/[`Error::Numeric`].
    #[allow(unused_variables)]
    fn postprocessing(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut S,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        Ok(())
    }

    /// Generates a new [`Algorithm::Summary`] from the final state of the run.
    ///
    /// # Errors
    ///
    /// Returns an `Err(Error<E>)` if any internal evaluation fails while creating the summary.
    fn summarize(&self, status: &S, user_data: &U) -> Result<Self::Summary, Error<E>>;
}
