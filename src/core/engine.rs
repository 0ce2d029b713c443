use std::sync::Arc;

use parking_lot::RwLock;

use crate::traits::{AbortSignal, Algorithm, CostFunction, Observer, Status};

use super::{Error, NopAbortSignal};

/// The main struct used for running [`Algorithm`]s on [`CostFunction`]s.
///
/// After [`Engine::minimize`] returns, the final [`Engine::result`] holds the best-ever position
/// and fitness along with the per-iteration history. If the run fails partway, the partial
/// history stays readable on [`Engine::status`] for diagnostics.
pub struct Engine<S, U, E, Summary> {
    /// The [`Status`] of the [`Algorithm`], live during minimization.
    pub status: S,
    /// The [`Algorithm::Summary`], read after minimization.
    pub result: Summary,

    algorithm: Box<dyn Algorithm<S, U, E, Summary = Summary>>,
    observers: Vec<Arc<RwLock<dyn Observer<S, U>>>>,
    abort_signal: Box<dyn AbortSignal>,
    user_data: U,
    max_steps: usize,
}

impl<S: Status, U: Default, E, Summary: Default> Engine<S, U, E, Summary> {
    /// Creates a new [`Engine`] with the given [`Algorithm`].
    pub fn new<T: Algorithm<S, U, E, Summary = Summary> + 'static>(algorithm: T) -> Self {
        Self {
            status: S::default(),
            result: Summary::default(),
            algorithm: Box::new(algorithm),
            observers: Vec::default(),
            abort_signal: Box::new(NopAbortSignal),
            user_data: U::default(),
            max_steps: usize::MAX,
        }
    }

    /// Convenience method to use chainable methods to set up the [`Engine`].
    pub fn setup<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&mut Self) -> &mut Self,
    {
        f(&mut self);
        self
    }

    /// Set an external cap on the number of steps, below the algorithm's own iteration budget
    /// (default: unlimited).
    pub fn with_max_steps(&mut self, max_steps: usize) -> &mut Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the [`AbortSignal`] of the [`Engine`] (default: [`NopAbortSignal`]).
    pub fn with_abort_signal<A: AbortSignal + 'static>(&mut self, abort_signal: A) -> &mut Self {
        self.abort_signal = Box::new(abort_signal);
        self
    }

    /// Set user data passed to every fitness evaluation.
    pub fn with_user_data<T: Into<U>>(&mut self, data: T) -> &mut Self {
        self.user_data = data.into();
        self
    }

    /// Adds a single [`Observer`] to the [`Engine`], called after every iteration.
    pub fn with_observer(&mut self, observer: Arc<RwLock<dyn Observer<S, U>>>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Minimize the given [`CostFunction`].
    ///
    /// This method first runs [`Algorithm::initialize`] (which validates the configuration and
    /// seeds every random generator), then runs [`Algorithm::step`] in a loop until
    /// [`Algorithm::check_for_termination`] reports the iteration budget is spent, an
    /// [`Observer`] breaks, or the [`AbortSignal`] fires. Finally
    /// [`Algorithm::postprocessing`] and [`Algorithm::summarize`] produce the
    /// [`Engine::result`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] before any iteration if the algorithm is misconfigured,
    /// and propagates [`Error::Numeric`] and [`Error::Objective`] from fitness evaluations. No
    /// failed operation is retried; [`Engine::status`] retains the history accumulated before
    /// the failure.
    pub fn minimize(&mut self, func: &dyn CostFunction<U, E>) -> Result<(), Error<E>> {
        self.status.reset();
        self.abort_signal.reset();
        self.algorithm
            .initialize(func, &mut self.status, &mut self.user_data)?;
        let mut current_step = 0;
        let mut observer_termination = false;
        while current_step < self.max_steps
            && !observer_termination
            && !self
                .algorithm
                .check_for_termination(func, &mut self.status, &mut self.user_data)?
            && !self.abort_signal.is_aborted()
        {
            self.algorithm
                .step(current_step, func, &mut self.status, &mut self.user_data)?;
            current_step += 1;
            for observer in &mut self.observers {
                observer_termination = observer
                    .write()
                    .callback(current_step, &mut self.status, &mut self.user_data)
                    .is_break()
                    || observer_termination;
            }
        }
        self.algorithm
            .postprocessing(func, &mut self.status, &mut self.user_data)?;
        if self.abort_signal.is_aborted() {
            self.status.update_message("abort signal received");
        }
        self.result = self.algorithm.summarize(&self.status, &self.user_data)?;
        Ok(())
    }
}
