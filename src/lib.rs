//! Train non-linear SVMs on partitioned data.
//!
//! The training pipeline never materializes the N×N kernel matrix: an
//! incomplete Cholesky factorization ([`icf::factorize`]) builds a low-rank
//! factor over the row-partitioned dataset, and a primal-dual interior-point
//! method ([`ipm::solve`]) uses that factor to solve the SVM dual problem in
//! work proportional to the chosen rank.
#![warn(missing_docs)]

pub mod cluster;
pub mod data;
pub mod icf;
pub mod ipm;
pub mod kernel;
pub mod linalg;

mod error;
mod status;
pub use crate::error::SvmError;
pub use crate::status::{Status, StatusCode};
