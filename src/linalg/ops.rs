//! Data-parallel passes over row-partitioned matrices and vectors.
//!
//! Each reduction runs one pass per partition, produces a partial result whose
//! size depends only on the column count, and merges partials with an
//! associative/commutative sum. The merge order across partitions is not
//! fixed, so results may differ by a few ULPs with the partition count.

use rayon::prelude::*;

use super::LlMatrix;
use crate::data::{DistMatrix, DistVec};

/// Computes `M'·diag(d)·M` as a packed lower triangle, one reduction pass.
pub fn product_mt_dm(m: &DistMatrix, d: &DistVec) -> LlMatrix {
    debug_assert_eq!(**m.layout(), **d.layout());
    let n = m.ncols();
    (0..m.layout().nparts())
        .into_par_iter()
        .map(|p| {
            let mut acc = LlMatrix::zeros(n);
            let dch = &d.chunks()[p];
            let mut buf = vec![0.0; n];
            for r in 0..dch.len() {
                for (j, col) in m.cols().iter().enumerate() {
                    buf[j] = col.chunks()[p][r];
                }
                for i in 0..n {
                    let wi = dch[r] * buf[i];
                    if wi != 0.0 {
                        for j in 0..=i {
                            acc.add(i, j, wi * buf[j]);
                        }
                    }
                }
            }
            acc
        })
        .reduce(
            || LlMatrix::zeros(n),
            |mut a, b| {
                a.add_assign(&b);
                a
            },
        )
}

/// Computes `M'·v`, one reduction pass.
pub fn product_mtv(m: &DistMatrix, v: &DistVec) -> Vec<f64> {
    debug_assert_eq!(**m.layout(), **v.layout());
    let n = m.ncols();
    (0..m.layout().nparts())
        .into_par_iter()
        .map(|p| {
            let vch = &v.chunks()[p];
            m.cols()
                .iter()
                .map(|col| {
                    col.chunks()[p]
                        .iter()
                        .zip(vch.iter())
                        .map(|(a, b)| a * b)
                        .sum()
                })
                .collect::<Vec<f64>>()
        })
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                for (ai, bi) in a.iter_mut().zip(b) {
                    *ai += bi;
                }
                a
            },
        )
}

/// Computes `v1·v2`, one reduction pass.
pub fn dot(v1: &DistVec, v2: &DistVec) -> f64 {
    debug_assert_eq!(**v1.layout(), **v2.layout());
    (0..v1.layout().nparts())
        .into_par_iter()
        .map(|p| {
            v1.chunks()[p]
                .iter()
                .zip(v2.chunks()[p].iter())
                .map(|(a, b)| a * b)
                .sum::<f64>()
        })
        .sum()
}

/// Subtracts a length-n vector from every row of `M`, producing a new matrix.
pub fn subtract_broadcast(m: &DistMatrix, v: &[f64]) -> DistMatrix {
    debug_assert_eq!(m.ncols(), v.len());
    let cols = m
        .cols()
        .iter()
        .zip(v.iter())
        .map(|(col, &vj)| col.map(|x| x - vj))
        .collect();
    DistMatrix::from_cols(m.layout(), cols)
}

/// Computes `M·s` for a small (length-n) vector `s`, one map pass.
pub fn product_mv(m: &DistMatrix, s: &[f64]) -> DistVec {
    debug_assert_eq!(m.ncols(), s.len());
    let layout = m.layout();
    let chunks = (0..layout.nparts())
        .into_par_iter()
        .map(|p| {
            let len = layout.range(p).len();
            let mut out = vec![0.0; len];
            for (col, &sj) in m.cols().iter().zip(s.iter()) {
                for (o, &c) in out.iter_mut().zip(col.chunks()[p].iter()) {
                    *o += c * sj;
                }
            }
            out
        })
        .collect();
    DistVec::from_chunks(layout, chunks)
}
