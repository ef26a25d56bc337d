//! Incomplete Cholesky factorization of the implicit kernel matrix.
//!
//! Greedy pivoted low-rank Cholesky: each round selects the unselected row
//! with the largest residual kernel diagonal, freezes it via one remote call
//! to its home node, and extends the factor by one column in a single fused
//! map pass. The N×N kernel matrix is never materialized; the factor has at
//! most `rank` columns.

use rayon::prelude::*;

use crate::cluster::Cluster;
use crate::data::{Dataset, DistMatrix, DistVec};
use crate::error::SvmError;
use crate::kernel::Kernel;

fn merge_pivot(a: Option<(f64, usize)>, b: Option<(f64, usize)>) -> Option<(f64, usize)> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if y.0 > x.0 { y } else { x }),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Builds the low-rank factor of the label-signed kernel matrix.
///
/// Stops after `rank` columns, or earlier once the residual trace drops below
/// `threshold` (normal termination; the factor is simply narrower). Sparse
/// rows and remote-call failures are fatal.
pub fn factorize(
    data: &Dataset,
    kernel: &dyn Kernel,
    cluster: &impl Cluster,
    rank: usize,
    threshold: f64,
) -> Result<DistMatrix, SvmError> {
    if let Some(row) = data.first_sparse() {
        return Err(SvmError::SparseRowsUnsupported(row));
    }
    let layout = data.layout().clone();
    let nparts = layout.nparts();

    // diag1[i] = k(row_i, row_i), one pass
    let diag1 = DistVec::from_chunks(
        &layout,
        data.chunks()
            .par_iter()
            .map(|rows| rows.iter().map(|r| kernel.self_similarity(r)).collect())
            .collect(),
    );
    let mut diag2 = DistVec::zeros(&layout);
    let mut selected: Vec<Vec<bool>> = (0..nparts)
        .map(|p| vec![false; layout.range(p).len()])
        .collect();
    let mut factor = DistMatrix::empty(&layout);

    for round in 0..rank {
        // residual trace and pivot index, one combined reduction
        let (trace, best) = (0..nparts)
            .into_par_iter()
            .map(|p| {
                let d1 = &diag1.chunks()[p];
                let d2 = &diag2.chunks()[p];
                let sel = &selected[p];
                let base = layout.range(p).start;
                let mut sum = 0.0;
                let mut best: Option<(f64, usize)> = None;
                for i in 0..d1.len() {
                    if sel[i] {
                        continue;
                    }
                    let res = d1[i] - d2[i];
                    sum += res;
                    if best.map_or(true, |(bv, _)| res > bv) {
                        best = Some((res, base + i));
                    }
                }
                (sum, best)
            })
            .reduce(
                || (0.0, None),
                |a, b| (a.0 + b.0, merge_pivot(a.1, b.1)),
            );

        // rank sufficiency reached
        if trace < threshold {
            break;
        }
        let Some((residual, pivot)) = best else {
            break;
        };
        debug_assert!(residual > 0.0);

        let part = layout.part_of(pivot);
        let off = pivot - layout.range(part).start;
        let mut newcol = DistVec::zeros(&layout);

        // the one synchronous cross-node call of the round: freeze the pivot
        // row, write the new diagonal entry, fetch the pivot's factor row
        let (header, pivot_row) = cluster.call_on(cluster.locate(pivot), || {
            selected[part][off] = true;
            let mut header: Vec<f64> =
                factor.cols().iter().map(|c| c.chunks()[part][off]).collect();
            header.push(residual.sqrt());
            newcol.chunks_mut()[part][off] = header[round];
            (header, data.chunks()[part][off].clone())
        })?;
        let head_r = header[round];

        // fill the new column for every unselected row, folding the diag2
        // update into the same pass
        newcol
            .chunks_mut()
            .par_iter_mut()
            .zip(diag2.chunks_mut().par_iter_mut())
            .zip(selected.par_iter())
            .zip(data.chunks().par_iter())
            .enumerate()
            .for_each(|(p, (((ncol, d2), sel), rows))| {
                for (i, row) in rows.iter().enumerate() {
                    if sel[i] {
                        continue;
                    }
                    let mut v = kernel.similarity_with_label(row, &pivot_row);
                    for (col, &hj) in factor.cols().iter().zip(header.iter()) {
                        v -= col.chunks()[p][i] * hj;
                    }
                    v /= head_r;
                    ncol[i] = v;
                    d2[i] += v * v;
                }
            });

        factor.push_col(newcol);
    }

    Ok(factor)
}
