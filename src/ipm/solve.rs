use std::time::Instant;

use rayon::prelude::*;

use super::Params;
use crate::data::{DistMatrix, DistVec};
use crate::error::SvmError;
use crate::linalg::{dot, product_mt_dm, product_mtv, product_mv, LlMatrix};
use crate::status::{Status, StatusCode};

/// Computes `Σ⁻¹·v` for `Σ = M·M' + diag(1/d)` via the Sherman-Morrison-
/// Woodbury identity, so only a rank-sized dense system is ever solved.
fn sigma_inv(m: &DistMatrix, l: &LlMatrix, d: &DistVec, v: &DistVec) -> DistVec {
    let dv = d.zip_map(v, |di, vi| di * vi);
    let q = l.solve(&product_mtv(m, &dv));
    let mq = product_mv(m, &q);
    let rest = v.zip_map(&mq, |vi, mi| vi - mi);
    d.zip_map(&rest, |di, ri| di * ri)
}

/// Runs the primal-dual interior-point iteration on the low-rank factor and
/// returns the dual coefficient vector.
///
/// Fatal errors abort the solve; running out of iterations or time is not an
/// error and returns the last iterate with the corresponding
/// [`StatusCode`].
pub fn solve(
    factor: &DistMatrix,
    labels: &DistVec,
    params: &Params,
    callback: Option<&dyn Fn(&Status) -> bool>,
) -> Result<Status, SvmError> {
    if **factor.layout() != **labels.layout() {
        return Err(SvmError::ShapeMismatch(
            "factor and labels are not co-partitioned".to_string(),
        ));
    }
    let layout = factor.layout().clone();
    for (p, chunk) in labels.chunks().iter().enumerate() {
        let base = layout.range(p).start;
        for (i, &y) in chunk.iter().enumerate() {
            if y != 1.0 && y != -1.0 {
                return Err(SvmError::InvalidLabels {
                    value: y,
                    row: base + i,
                });
            }
        }
    }

    let start = Instant::now();
    let nrows = factor.nrows() as f64;
    let nparts = layout.nparts();

    // box bounds and a strictly interior starting point
    let c = labels.map(|y| if y > 0.0 { params.c_pos } else { params.c_neg });
    let mut x = DistVec::zeros(&layout);
    let mut xi = c.map(|ci| ci / 10.0);
    let mut la = xi.clone();
    let mut nu = 0.0;

    let mut status = Status::new();
    let mut step: usize = 0;
    let mut stop = false;

    if params.verbose > 0 {
        println!(
            "{:>10} {:>10} {:>12} {:>12} {:>12}",
            "iter", "time", "gap", "resp", "resd"
        );
    }

    loop {
        // update steps and time
        status.steps = step;
        let elapsed = start.elapsed().as_secs_f64();
        status.time = elapsed;

        // handle iteration limit
        if step >= params.max_iter {
            status.code = StatusCode::MaxSteps;
            stop = true;
        }

        // handle time limit
        if params.time_limit > 0.0 && elapsed >= params.time_limit {
            status.code = StatusCode::TimeLimit;
            stop = true;
        }

        // handle callback
        if let Some(callback_fn) = callback {
            if callback_fn(&status) {
                status.code = StatusCode::Callback;
                stop = true;
            }
        };

        // terminate without a fresh direction
        if stop {
            break;
        }

        // surrogate gap and barrier parameter
        let eta: f64 = (0..nparts)
            .into_par_iter()
            .map(|p| {
                let lc = &la.chunks()[p];
                let cc = &c.chunks()[p];
                let xc = &x.chunks()[p];
                let xic = &xi.chunks()[p];
                let mut sum = 0.0;
                for i in 0..lc.len() {
                    sum += lc[i] * cc[i] + xc[i] * (xic[i] - lc[i]);
                }
                sum
            })
            .sum();
        status.gap = eta;
        let t = params.mu_factor * 2.0 * nrows / eta;

        // partial residual z = M·(M'·x) − tradeoff·x
        let mtx = product_mtv(factor, &x);
        let z = product_mv(factor, &mtx).zip_map(&x, |zi, xv| zi - params.tradeoff * xv);

        // primal and dual residuals, one reduction
        let (resp_sum, resd_sq) = (0..nparts)
            .into_par_iter()
            .map(|p| {
                let yc = &labels.chunks()[p];
                let xc = &x.chunks()[p];
                let lc = &la.chunks()[p];
                let xic = &xi.chunks()[p];
                let zc = &z.chunks()[p];
                let mut sum = 0.0;
                let mut sq = 0.0;
                for i in 0..yc.len() {
                    sum += yc[i] * xc[i];
                    let r = lc[i] - xic[i] + zc[i] + nu * yc[i] - 1.0;
                    sq += r * r;
                }
                (sum, sq)
            })
            .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));
        status.resp = resp_sum.abs();
        status.resd = resd_sq.sqrt();

        // convergence test
        let optimal = status.resp <= params.feasible_threshold
            && status.resd <= params.feasible_threshold
            && eta <= params.surrogate_gap_threshold;
        if optimal {
            status.code = StatusCode::Optimal;
            stop = true;
        }

        // handle progress output
        if params.verbose > 0 && (step % params.verbose == 0 || optimal) {
            println!(
                "{:10} {:10.2} {:12.6e} {:12.6e} {:12.6e}",
                step, elapsed, status.gap, status.resp, status.resd
            );
        }

        // terminate
        if stop {
            break;
        }

        // box-aware diagonal reweighting, barrier terms and Newton rhs
        let mut d = DistVec::zeros(&layout);
        let mut rhs = DistVec::zeros(&layout);
        let mut tlx = DistVec::zeros(&layout);
        let mut tux = DistVec::zeros(&layout);
        d.chunks_mut()
            .par_iter_mut()
            .zip(rhs.chunks_mut().par_iter_mut())
            .zip(tlx.chunks_mut().par_iter_mut())
            .zip(tux.chunks_mut().par_iter_mut())
            .enumerate()
            .for_each(|(p, (((dch, rch), tlch), tuch))| {
                let xc = &x.chunks()[p];
                let cc = &c.chunks()[p];
                let lc = &la.chunks()[p];
                let xic = &xi.chunks()[p];
                let zc = &z.chunks()[p];
                let yc = &labels.chunks()[p];
                for i in 0..xc.len() {
                    let m_lx = xc[i].max(params.x_epsilon);
                    let m_ux = (cc[i] - xc[i]).max(params.x_epsilon);
                    tlch[i] = 1.0 / (t * m_lx);
                    tuch[i] = 1.0 / (t * m_ux);
                    dch[i] = 1.0 / (xic[i] / m_lx + lc[i] / m_ux - params.tradeoff);
                    rch[i] = tlch[i] - tuch[i] - zc[i] - nu * yc[i] + 1.0;
                }
            });

        // reduced system A = I + M'·diag(d)·M; breakdown here is fatal
        let mut a = product_mt_dm(factor, &d);
        a.add_diagonal(1.0);
        let l = a.cholesky()?;

        // two reduced solves give Δν and the Newton direction Δx
        let sir = sigma_inv(factor, &l, &d, &rhs);
        let siy = sigma_inv(factor, &l, &d, labels);
        let dnu = (dot(labels, &sir) + dot(labels, &x)) / dot(labels, &siy);
        let dx = sir.zip_map(&siy, |si, sy| si - dnu * sy);

        // back-substitute the bound multiplier deltas
        let mut dxi = DistVec::zeros(&layout);
        let mut dla = DistVec::zeros(&layout);
        dxi.chunks_mut()
            .par_iter_mut()
            .zip(dla.chunks_mut().par_iter_mut())
            .enumerate()
            .for_each(|(p, (dxic, dlac))| {
                let xc = &x.chunks()[p];
                let cc = &c.chunks()[p];
                let lc = &la.chunks()[p];
                let xic = &xi.chunks()[p];
                let tlch = &tlx.chunks()[p];
                let tuch = &tux.chunks()[p];
                let dxc = &dx.chunks()[p];
                for i in 0..xc.len() {
                    let m_lx = xc[i].max(params.x_epsilon);
                    let m_ux = (cc[i] - xc[i]).max(params.x_epsilon);
                    dxic[i] = tlch[i] - xic[i] - xic[i] / m_lx * dxc[i];
                    dlac[i] = tuch[i] - lc[i] + lc[i] / m_ux * dxc[i];
                }
            });

        // ratio-test line search: keep x inside [0, c] and xi, la nonnegative
        let (bound_p, bound_d) = (0..nparts)
            .into_par_iter()
            .map(|p| {
                let xc = &x.chunks()[p];
                let cc = &c.chunks()[p];
                let lc = &la.chunks()[p];
                let xic = &xi.chunks()[p];
                let dxc = &dx.chunks()[p];
                let dxic = &dxi.chunks()[p];
                let dlac = &dla.chunks()[p];
                let mut bp = f64::INFINITY;
                let mut bd = f64::INFINITY;
                for i in 0..xc.len() {
                    if dxc[i] > 0.0 {
                        bp = bp.min((cc[i] - xc[i]) / dxc[i]);
                    } else if dxc[i] < 0.0 {
                        bp = bp.min(-xc[i] / dxc[i]);
                    }
                    if dxic[i] < 0.0 {
                        bd = bd.min(-xic[i] / dxic[i]);
                    }
                    if dlac[i] < 0.0 {
                        bd = bd.min(-lc[i] / dlac[i]);
                    }
                }
                (bp, bd)
            })
            .reduce(
                || (f64::INFINITY, f64::INFINITY),
                |a, b| (a.0.min(b.0), a.1.min(b.1)),
            );
        let a_primal = (0.99 * bound_p).min(1.0);
        let a_dual = (0.99 * bound_d).min(1.0);

        // apply the step
        x = x.zip_map(&dx, |v, dv| v + a_primal * dv);
        xi = xi.zip_map(&dxi, |v, dv| v + a_dual * dv);
        la = la.zip_map(&dla, |v, dv| v + a_dual * dv);
        nu += a_dual * dnu;
        step += 1;
    }

    status.x = x.to_vec();
    status.nu = nu;
    Ok(status)
}
