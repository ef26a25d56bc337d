use crate::cluster::ClusterError;
use crate::kernel::KernelType;

/// Fatal conditions that abort a factorization or solve.
///
/// Recoverable outcomes (non-convergence, early factorization stop) are not
/// errors; they are reported through [`crate::StatusCode`] or the shape of
/// the returned factor.
#[derive(Debug, thiserror::Error)]
pub enum SvmError {
    /// The matrix handed to the Cholesky factorization is not positive
    /// definite. During a solve this signals numerical breakdown of the
    /// interior-point regularization `I + M'DM`.
    #[error("matrix is not positive definite (diagonal term {value:.6e} at row {row})")]
    NotPositiveDefinite {
        /// Offending diagonal term.
        value: f64,
        /// Row at which the factorization broke down.
        row: usize,
    },

    /// Sparse row representations are not implemented.
    #[error("sparse rows are not supported, row {0} is sparse")]
    SparseRowsUnsupported(usize),

    /// Labels must take exactly the two values -1 and +1.
    #[error("invalid label {value} at row {row}, labels must be -1 or +1")]
    InvalidLabels {
        /// Offending label value.
        value: f64,
        /// Row at which it was found.
        row: usize,
    },

    /// The requested kernel type has no stabilized implementation.
    #[error("kernel type {0:?} is not implemented")]
    UnsupportedKernel(KernelType),

    /// Two distributed structures do not share the same partition layout.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A remote call to a partition's home node failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}
