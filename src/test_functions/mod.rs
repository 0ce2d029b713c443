/// The Rastrigin function.
pub mod rastrigin;
/// The Rosenbrock function.
pub mod rosenbrock;
/// The sphere function.
pub mod sphere;

pub use rastrigin::Rastrigin;
pub use rosenbrock::Rosenbrock;
pub use sphere::Sphere;
