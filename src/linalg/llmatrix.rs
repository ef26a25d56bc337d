use crate::error::SvmError;

/// Small n×n symmetric matrix stored as a packed lower triangle.
///
/// Holds `I + M'DM` for one solver iteration (n is the factorization rank, at
/// most a few thousand) and, after [`LlMatrix::cholesky`], its factor L. The
/// packed backing layout is reachable only through `get`/`set`/`add`.
#[derive(Clone, Debug)]
pub struct LlMatrix {
    n: usize,
    data: Vec<f64>,
}

#[inline]
fn idx(row: usize, col: usize) -> usize {
    debug_assert!(col <= row);
    row * (row + 1) / 2 + col
}

impl LlMatrix {
    /// Creates a zero matrix of size `n`.
    pub fn zeros(n: usize) -> LlMatrix {
        LlMatrix {
            n,
            data: vec![0.0; n * (n + 1) / 2],
        }
    }

    /// Matrix size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry at `(row, col)` with `col <= row`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[idx(row, col)]
    }

    /// Sets the entry at `(row, col)` with `col <= row`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[idx(row, col)] = value;
    }

    /// Adds to the entry at `(row, col)` with `col <= row`.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[idx(row, col)] += value;
    }

    /// Adds `value` to every diagonal entry.
    pub fn add_diagonal(&mut self, value: f64) {
        for i in 0..self.n {
            self.data[idx(i, i)] += value;
        }
    }

    /// Merges another partial result into this one (reduction step).
    pub fn add_assign(&mut self, other: &LlMatrix) {
        debug_assert_eq!(self.n, other.n);
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    /// Classic outer-product Cholesky factorization, in place on the packed
    /// triangle. Consumes the matrix and returns the lower factor L.
    ///
    /// A non-positive diagonal term means the matrix is not positive definite
    /// and yields the non-recoverable [`SvmError::NotPositiveDefinite`].
    pub fn cholesky(mut self) -> Result<LlMatrix, SvmError> {
        for row in 0..self.n {
            for col in 0..row {
                let mut sum = self.data[idx(row, col)];
                for k in 0..col {
                    sum -= self.data[idx(row, k)] * self.data[idx(col, k)];
                }
                self.data[idx(row, col)] = sum / self.data[idx(col, col)];
            }
            let mut sum = self.data[idx(row, row)];
            for k in 0..row {
                let l = self.data[idx(row, k)];
                sum -= l * l;
            }
            if sum <= 0.0 {
                return Err(SvmError::NotPositiveDefinite { value: sum, row });
            }
            self.data[idx(row, row)] = sum.sqrt();
        }
        Ok(self)
    }

    /// Solves `L·L'·x = b` by forward then backward substitution, treating
    /// this matrix as the Cholesky factor L. O(n²).
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        debug_assert_eq!(b.len(), self.n);
        let mut x = b.to_vec();
        for i in 0..self.n {
            for j in 0..i {
                x[i] -= self.data[idx(i, j)] * x[j];
            }
            x[i] /= self.data[idx(i, i)];
        }
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                x[i] -= self.data[idx(j, i)] * x[j];
            }
            x[i] /= self.data[idx(i, i)];
        }
        x
    }
}
