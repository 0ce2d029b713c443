use std::convert::Infallible;
use std::fmt::{Debug, Display};

/// The failure taxonomy shared by every engine in this crate.
///
/// The generic `E` is the error type of the user's
/// [`CostFunction`](`crate::traits::CostFunction`) (default [`Infallible`] for fitness functions
/// which cannot fail). No variant is ever retried: the first error aborts the run, and any
/// history accumulated before the failure remains readable on the
/// [`Engine`](`crate::core::Engine`)'s status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E = Infallible> {
    /// The engine was configured with invalid parameters (an empty axis domain, an inertia
    /// weight outside `[0, 1]`, an unknown topology selector). Raised before any iteration runs.
    Configuration(String),
    /// A numeric invariant was violated: a distance would divide by a zero-fitness vertex, or a
    /// fitness evaluation returned a NaN/infinite value.
    Numeric(String),
    /// The user-supplied fitness function failed. Always fatal, surfaced immediately.
    Objective(E),
}

impl<E> Error<E> {
    /// Shorthand for a [`Error::Configuration`] with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
    /// Shorthand for a [`Error::Numeric`] with the given message.
    pub fn numeric(message: impl Into<String>) -> Self {
        Self::Numeric(message.into())
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::Numeric(msg) => write!(f, "numeric error: {msg}"),
            Self::Objective(err) => write!(f, "objective function error: {err}"),
        }
    }
}

impl<E: Debug + Display> std::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e: Error = Error::configuration("axis 2 is empty");
        assert_eq!(e.to_string(), "configuration error: axis 2 is empty");
        let e: Error = Error::numeric("non-finite fitness");
        assert_eq!(e.to_string(), "numeric error: non-finite fitness");
        let e: Error<String> = Error::Objective("broken".to_string());
        assert_eq!(e.to_string(), "objective function error: broken");
    }
}
