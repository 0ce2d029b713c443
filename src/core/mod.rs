/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal).
pub mod abort_signal;
/// [`Bound`] type for confining continuous searches to a box.
pub mod bound;
/// [`Engine`] type for driving optimization runs.
pub mod engine;
/// [`Error`] taxonomy shared by every engine.
pub mod error;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`RunSummary`] type for the result of a run.
pub mod summary;
/// Random-sampling and matrix helpers.
pub mod utils;

pub use abort_signal::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::Bound;
pub use engine::Engine;
pub use error::Error;
pub use point::Point;
pub use summary::RunSummary;
pub use utils::{row_normalize, RandChoice, SampleFloat};
