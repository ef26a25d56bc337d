//! Primal-dual interior-point solver for the SVM dual problem.
mod params;
pub use self::params::Params;

mod solve;
pub use solve::solve;
