//! Dense triangular solver and distributed linear-algebra primitives.
mod llmatrix;
mod ops;

pub use llmatrix::LlMatrix;
pub use ops::{dot, product_mt_dm, product_mtv, product_mv, subtract_broadcast};
