use approx::assert_relative_eq;
use psvm::linalg::LlMatrix;
use psvm::SvmError;

// Small deterministic generator, good enough for test matrices.
struct XorShift(u64);

impl XorShift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}

// Random SPD matrix B·B' + n·I, returned dense and packed.
fn random_spd(n: usize, seed: u64) -> (Vec<Vec<f64>>, LlMatrix) {
    let mut rng = XorShift(seed);
    let b: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.next_f64()).collect())
        .collect();
    let mut dense = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += b[i][k] * b[j][k];
            }
            dense[i][j] = sum + if i == j { n as f64 } else { 0.0 };
        }
    }
    let mut packed = LlMatrix::zeros(n);
    for i in 0..n {
        for j in 0..=i {
            packed.set(i, j, dense[i][j]);
        }
    }
    (dense, packed)
}

#[test]
fn test_packed_get_set() {
    let mut m = LlMatrix::zeros(4);
    m.set(2, 1, 5.0);
    m.set(3, 3, -1.5);
    m.add(2, 1, 0.5);
    assert_relative_eq!(m.get(2, 1), 5.5);
    assert_relative_eq!(m.get(3, 3), -1.5);
    assert_relative_eq!(m.get(0, 0), 0.0);
}

#[test]
fn test_add_assign_merges_partials() {
    let mut a = LlMatrix::zeros(3);
    let mut b = LlMatrix::zeros(3);
    a.set(1, 0, 2.0);
    b.set(1, 0, 3.0);
    b.set(2, 2, 1.0);
    a.add_assign(&b);
    assert_relative_eq!(a.get(1, 0), 5.0);
    assert_relative_eq!(a.get(2, 2), 1.0);
}

#[test]
fn test_cholesky_reconstructs_spd_matrices() {
    for &(n, seed) in &[(1usize, 3u64), (5, 7), (20, 11), (83, 13), (200, 17)] {
        let (dense, packed) = random_spd(n, seed);
        let l = packed.cholesky().unwrap();
        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                for k in 0..=j {
                    sum += l.get(i, k) * l.get(j, k);
                }
                assert_relative_eq!(sum, dense[i][j], max_relative = 1e-8);
            }
        }
    }
}

#[test]
fn test_solve_satisfies_the_system() {
    for &(n, seed) in &[(3usize, 23u64), (50, 29), (150, 31)] {
        let (dense, packed) = random_spd(n, seed);
        let mut rng = XorShift(seed ^ 0xdead);
        let b: Vec<f64> = (0..n).map(|_| rng.next_f64() * 10.0).collect();
        let l = packed.cholesky().unwrap();
        let x = l.solve(&b);
        for i in 0..n {
            let mut ax = 0.0;
            for j in 0..n {
                ax += dense[i][j] * x[j];
            }
            assert_relative_eq!(ax, b[i], max_relative = 1e-6, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_non_positive_definite_is_fatal() {
    let mut m = LlMatrix::zeros(2);
    m.set(0, 0, 1.0);
    m.set(1, 0, 2.0);
    m.set(1, 1, 1.0); // 2x2 with determinant -3
    assert!(matches!(
        m.cholesky(),
        Err(SvmError::NotPositiveDefinite { row: 1, .. })
    ));

    let mut zero_diag = LlMatrix::zeros(1);
    zero_diag.set(0, 0, 0.0);
    assert!(zero_diag.cholesky().is_err());
}
