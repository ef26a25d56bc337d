use std::sync::Arc;

use approx::assert_relative_eq;
use psvm::data::{DistMatrix, DistVec, Layout};
use psvm::linalg::{dot, product_mt_dm, product_mtv, product_mv, subtract_broadcast};

struct XorShift(u64);

impl XorShift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}

fn random_case(nrows: usize, ncols: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = XorShift(seed);
    let m: Vec<f64> = (0..nrows * ncols).map(|_| rng.next_f64()).collect();
    let v: Vec<f64> = (0..nrows).map(|_| rng.next_f64()).collect();
    let s: Vec<f64> = (0..ncols).map(|_| rng.next_f64()).collect();
    (m, v, s)
}

const PARTITION_COUNTS: [usize; 4] = [1, 2, 3, 7];

#[test]
fn test_product_mt_dm_matches_dense_reference() {
    let (nrows, ncols) = (23, 5);
    let (m, d, _) = random_case(nrows, ncols, 41);
    for &nparts in &PARTITION_COUNTS {
        let layout = Arc::new(Layout::even(nrows, nparts));
        let dm = DistMatrix::from_dense(&layout, &m, ncols);
        let dv = DistVec::from_vec(&layout, d.clone());
        let result = product_mt_dm(&dm, &dv);
        for i in 0..ncols {
            for j in 0..=i {
                let mut expected = 0.0;
                for r in 0..nrows {
                    expected += d[r] * m[r * ncols + i] * m[r * ncols + j];
                }
                assert_relative_eq!(
                    result.get(i, j),
                    expected,
                    max_relative = 1e-10,
                    epsilon = 1e-12
                );
            }
        }
    }
}

#[test]
fn test_product_mtv_matches_dense_reference() {
    let (nrows, ncols) = (31, 4);
    let (m, v, _) = random_case(nrows, ncols, 43);
    for &nparts in &PARTITION_COUNTS {
        let layout = Arc::new(Layout::even(nrows, nparts));
        let dm = DistMatrix::from_dense(&layout, &m, ncols);
        let dv = DistVec::from_vec(&layout, v.clone());
        let result = product_mtv(&dm, &dv);
        assert_eq!(result.len(), ncols);
        for j in 0..ncols {
            let expected: f64 = (0..nrows).map(|r| m[r * ncols + j] * v[r]).sum();
            assert_relative_eq!(result[j], expected, max_relative = 1e-10, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_dot_matches_dense_reference() {
    let nrows = 29;
    let mut rng = XorShift(47);
    let a: Vec<f64> = (0..nrows).map(|_| rng.next_f64()).collect();
    let b: Vec<f64> = (0..nrows).map(|_| rng.next_f64()).collect();
    let expected: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    for &nparts in &PARTITION_COUNTS {
        let layout = Arc::new(Layout::even(nrows, nparts));
        let da = DistVec::from_vec(&layout, a.clone());
        let db = DistVec::from_vec(&layout, b.clone());
        assert_relative_eq!(dot(&da, &db), expected, max_relative = 1e-10, epsilon = 1e-12);
    }
}

#[test]
fn test_product_mv_matches_dense_reference() {
    let (nrows, ncols) = (17, 6);
    let (m, _, s) = random_case(nrows, ncols, 53);
    for &nparts in &PARTITION_COUNTS {
        let layout = Arc::new(Layout::even(nrows, nparts));
        let dm = DistMatrix::from_dense(&layout, &m, ncols);
        let result = product_mv(&dm, &s).to_vec();
        for r in 0..nrows {
            let expected: f64 = (0..ncols).map(|j| m[r * ncols + j] * s[j]).sum();
            assert_relative_eq!(result[r], expected, max_relative = 1e-10, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_subtract_broadcast_subtracts_from_every_row() {
    let (nrows, ncols) = (11, 3);
    let (m, _, s) = random_case(nrows, ncols, 59);
    for &nparts in &PARTITION_COUNTS {
        let layout = Arc::new(Layout::even(nrows, nparts));
        let dm = DistMatrix::from_dense(&layout, &m, ncols);
        let shifted = subtract_broadcast(&dm, &s);
        assert_eq!(shifted.nrows(), nrows);
        assert_eq!(shifted.ncols(), ncols);
        for r in 0..nrows {
            for j in 0..ncols {
                assert_relative_eq!(shifted.get(r, j), m[r * ncols + j] - s[j]);
            }
        }
        // input untouched
        assert_relative_eq!(dm.get(0, 0), m[0]);
    }
}

#[test]
fn test_push_col_grows_the_matrix_one_column_at_a_time() {
    let (nrows, ncols) = (13, 4);
    let (m, _, _) = random_case(nrows, ncols, 61);
    let layout = Arc::new(Layout::even(nrows, 3));
    let reference = DistMatrix::from_dense(&layout, &m, ncols);
    let mut built = DistMatrix::empty(&layout);
    for j in 0..ncols {
        let col = (0..nrows).map(|i| m[i * ncols + j]).collect();
        built.push_col(DistVec::from_vec(&layout, col));
        assert_eq!(built.ncols(), j + 1);
    }
    for i in 0..nrows {
        for j in 0..ncols {
            assert_relative_eq!(built.get(i, j), reference.get(i, j));
        }
    }
}

#[test]
fn test_zero_column_matrix_is_well_defined() {
    let layout = Arc::new(Layout::even(9, 3));
    let dm = DistMatrix::empty(&layout);
    let dv = DistVec::zeros(&layout);
    assert_eq!(product_mtv(&dm, &dv).len(), 0);
    assert_eq!(product_mt_dm(&dm, &dv).n(), 0);
    assert_eq!(product_mv(&dm, &[]).to_vec(), vec![0.0; 9]);
}
