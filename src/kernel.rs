//! Kernel functions between feature rows.
pub mod gaussian;
pub use gaussian::GaussianKernel;

use crate::data::Row;
use crate::error::SvmError;

/// Pure similarity function between two feature rows.
///
/// Implementations must be thread-safe: row pairs are evaluated concurrently
/// from many partitions during a factorization.
pub trait Kernel: Sync {
    /// Computes `k(a, b)`.
    fn similarity(&self, a: &Row, b: &Row) -> f64;

    /// Computes `k(a, a)`.
    fn self_similarity(&self, a: &Row) -> f64 {
        self.similarity(a, a)
    }

    /// Computes `k(a, b)`, sign-flipped when the two rows' labels disagree.
    ///
    /// Used by the factorization to fold the labels into the low-rank factor,
    /// so the solver's implicit kernel matrix is already label-signed.
    fn similarity_with_label(&self, a: &Row, b: &Row) -> f64 {
        let sign = match (a.label(), b.label()) {
            (Some(la), Some(lb)) if la * lb < 0.0 => -1.0,
            _ => 1.0,
        };
        sign * self.similarity(a, b)
    }
}

/// Kernel types understood by the configuration layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelType {
    /// Gaussian (RBF) kernel, the one stabilized implementation.
    Gaussian,
    /// Linear kernel (declared, not implemented).
    Linear,
    /// Polynomial kernel (declared, not implemented).
    Polynomial,
}

/// Builds a kernel for the given type and parameter.
///
/// Unsupported types fail here, at configuration time, never mid-computation.
pub fn from_type(kind: KernelType, gamma: f64) -> Result<Box<dyn Kernel>, SvmError> {
    match kind {
        KernelType::Gaussian => Ok(Box::new(GaussianKernel::new(gamma))),
        other => Err(SvmError::UnsupportedKernel(other)),
    }
}
