//! Gaussian kernel function
use super::Kernel;
use crate::data::Row;

/// Gaussian (RBF) kernel `k(a, b) = exp(-γ·(‖a‖² + ‖b‖² − 2·a·b))`.
///
/// Uses each row's precomputed squared norm, so one evaluation costs a single
/// dot product.
pub struct GaussianKernel {
    gamma: f64,
}

impl GaussianKernel {
    /// Creates a Gaussian kernel with the given width parameter γ.
    pub fn new(gamma: f64) -> Self {
        GaussianKernel { gamma }
    }
}

impl Kernel for GaussianKernel {
    fn similarity(&self, a: &Row, b: &Row) -> f64 {
        let dist_sq = a.norm_sq() + b.norm_sq() - 2.0 * a.dot(b);
        (-self.gamma * dist_sq).exp()
    }

    fn self_similarity(&self, _a: &Row) -> f64 {
        1.0
    }
}
