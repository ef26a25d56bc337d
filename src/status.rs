use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Possible outcomes of the interior-point solver
pub enum StatusCode {
    /// Optimization not started
    Initialized,
    /// Solution found (up to defined tolerances)
    Optimal,
    /// Maximum number of iterations reached
    MaxSteps,
    /// Time limit reached
    TimeLimit,
    /// Stopped by the callback function
    Callback,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// A struct containing information about the current point and state of the solver
pub struct Status {
    /// Vector of dual coefficients (typically called α in the literature);
    /// populated when the solve returns
    pub x: Vec<f64>,
    /// Multiplier of the equality constraint `y'x = 0`
    pub nu: f64,
    /// Surrogate duality gap
    pub gap: f64,
    /// Primal residual `|Σ yᵢxᵢ|`
    pub resp: f64,
    /// Dual residual norm
    pub resd: f64,
    /// Number of conducted iterations
    pub steps: usize,
    /// Elapsed time (in seconds)
    pub time: f64,
    /// Current status
    pub code: StatusCode,
}

impl Status {
    /// Create a [`Status`] struct with default initialization
    pub fn new() -> Status {
        Status {
            x: Vec::new(),
            nu: 0.0,
            gap: f64::INFINITY,
            resp: f64::INFINITY,
            resd: f64::INFINITY,
            steps: 0,
            time: 0.0,
            code: StatusCode::Initialized,
        }
    }

    /// Whether the solver met all convergence thresholds
    pub fn converged(&self) -> bool {
        self.code == StatusCode::Optimal
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::new()
    }
}
