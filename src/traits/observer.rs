use std::{fmt::Debug, ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;

use super::Status;

/// A trait which holds a [`callback`](`Observer::callback`) function that can be used to check
/// an [`Algorithm`](`crate::traits::Algorithm`)'s [`Status`] during a run.
///
/// This is the supported hook for progress reporting and for external early termination: the
/// engines themselves run for a fixed iteration budget.
pub trait Observer<S: Status, U> {
    /// A function that is called at every step of an algorithm. If it returns
    /// [`ControlFlow::Break`], the [`Engine::minimize`](`crate::core::Engine::minimize`) method
    /// will terminate early.
    fn callback(&mut self, step: usize, status: &mut S, user_data: &mut U) -> ControlFlow<()>;
}

/// A debugging observer which prints out the step and status at the current step in an
/// algorithm.
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`].
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<S: Status + Debug, U> Observer<S, U> for DebugObserver {
    fn callback(&mut self, step: usize, status: &mut S, _user_data: &mut U) -> ControlFlow<()> {
        println!("Step: {}\n{:#?}", step, status);
        ControlFlow::Continue(())
    }
}

/// An observer which records a snapshot of the [`Status`] after every step.
#[derive(Default)]
pub struct TrackingObserver<S> {
    /// The recorded `(step, status)` snapshots.
    pub snapshots: Vec<(usize, S)>,
}
impl<S> TrackingObserver<S> {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`].
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self {
            snapshots: Vec::new(),
        }))
    }
}
impl<S: Status, U> Observer<S, U> for TrackingObserver<S> {
    fn callback(&mut self, step: usize, status: &mut S, _user_data: &mut U) -> ControlFlow<()> {
        self.snapshots.push((step, status.clone()));
        ControlFlow::Continue(())
    }
}
