use serde::{de::DeserializeOwned, Serialize};

/// A trait which holds the live state of an [`Algorithm`](`crate::traits::Algorithm`) and has to
/// be implemented for custom algorithms that need different state than the engines in this
/// crate.
pub trait Status: Clone + Default + Serialize + DeserializeOwned {
    /// Resets the status to its default state. This is called at the beginning of every
    /// [`Engine::minimize`](`crate::core::Engine::minimize`) run.
    fn reset(&mut self);
    /// Returns `true` if the run completed its full iteration budget.
    fn converged(&self) -> bool;
    /// Returns the message of the run.
    fn message(&self) -> &str;
    /// Sets the message of the run.
    fn update_message(&mut self, message: &str);
}
