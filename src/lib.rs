//! `myrmex` (/ˈmɜːrmɛks/, from the Greek for "ant") provides a small set of population-based
//! stochastic optimizers which minimize a user-supplied scalar fitness function, either over a
//! discrete combinatorial space (an ant colony walking a graph of candidate vectors) or over a
//! continuous bounded space (a particle swarm with selectable neighbor topologies). The user
//! implements the [`CostFunction`](`crate::traits::CostFunction`) trait on some struct which takes
//! a vector of parameters and returns a single [`Result`]-wrapped value
//! ($`f(\mathbb{R}^n) \to [0, \infty)`$, lower is better).
//!
//! # Key Features
//! * Two engines behind one trait-oriented interface: [`AntColony`](`algorithms::colony::AntColony`)
//!   and [`ParticleSwarm`](`algorithms::particles::ParticleSwarm`).
//! * Explicit, seedable random generators everywhere, so every run is reproducible.
//! * Per-iteration best-so-far history, readable even after a mid-run failure.
//! * [`Observer`](`traits::Observer`)s which can watch (or externally stop) a run.
//! * Pressing `Ctrl-C` during a run can be turned into a clean stop via
//!   [`CtrlCAbortSignal`](`core::CtrlCAbortSignal`).
//!
//! # Quick Start
//!
//! Minimizing the [`Sphere`](`test_functions::Sphere`) function with a particle swarm:
//!
//! ```rust
//! use myrmex::algorithms::particles::{InertiaWeight, ParticleSwarm};
//! use myrmex::core::{Engine, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let pso = ParticleSwarm::new(2)
//!         .with_bound(-5.0, 5.0)
//!         .with_n_particles(30)
//!         .with_max_epochs(50)
//!         .with_inertia(InertiaWeight::Constant(0.7))
//!         .with_c1(1.5)
//!         .with_c2(1.5)
//!         .with_seed(0);
//!     let mut engine = Engine::new(pso);
//!     engine.minimize(&myrmex::test_functions::Sphere)?;
//!     assert_eq!(engine.result.history.len(), 50);
//!     assert!(engine.result.fx < 0.5);
//!     Ok(())
//! }
//! ```
//!
//! The ant colony works the same way, but walks an enumerated grid of candidate vectors built
//! from per-dimension discrete domains:
//!
//! ```rust
//! use myrmex::algorithms::colony::AntColony;
//! use myrmex::core::{Engine, Error};
//! use myrmex::traits::CostFunction;
//! use myrmex::{DVector, Float};
//! use std::convert::Infallible;
//!
//! struct OffsetSphere;
//! impl CostFunction for OffsetSphere {
//!     fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
//!         Ok(x[0].powi(2) + x[1].powi(2) + 1.0)
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let axes = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]];
//!     let aco = AntColony::new(axes)
//!         .with_n_ants(10)
//!         .with_tours(20)
//!         .with_seed(0);
//!     let mut engine = Engine::new(aco);
//!     engine.minimize(&OffsetSphere)?;
//!     assert_eq!(engine.result.history.len(), 20);
//!     assert!(engine.result.fx >= 1.0);
//!     Ok(())
//! }
//! ```
//!
//! # Fitness Contract
//!
//! The fitness function must be total over the search space, return values in $`[0, \infty)`$,
//! and be pure with respect to global state: the engines call it many times per iteration and
//! assume no side effects. A failing fitness function is fatal and never retried; see
//! [`Error`](`core::Error`) for the full failure taxonomy.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the optimization algorithms.
pub mod algorithms;
/// Module containing the engine driver and shared value types.
pub mod core;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the crate's foundational traits.
pub mod traits;

pub use nalgebra::{DMatrix, DVector};

/// A module containing everything someone should need to use this crate for non-development
/// purposes.
pub mod prelude {
    pub use crate::algorithms::colony::AntColony;
    pub use crate::algorithms::particles::{InertiaWeight, ParticleSwarm, Topology};
    pub use crate::core::{Bound, Engine, Error, Point, RunSummary};
    pub use crate::traits::{AbortSignal, Algorithm, CostFunction, Observer, Status};
    pub use crate::{DMatrix, DVector, Float, PI};
}

#[cfg(not(feature = "f32"))]
/// A type alias for the floating-point precision used by the crate (defaults to [`f64`], [`f32`]
/// via the `f32` feature).
pub type Float = f64;

#[cfg(feature = "f32")]
/// A type alias for the floating-point precision used by the crate (defaults to [`f64`], [`f32`]
/// via the `f32` feature).
pub type Float = f32;

#[cfg(not(feature = "f32"))]
/// The constant $`\pi`$ at the crate's floating-point precision.
pub const PI: Float = std::f64::consts::PI;

#[cfg(feature = "f32")]
/// The constant $`\pi`$ at the crate's floating-point precision.
pub const PI: Float = std::f32::consts::PI;
