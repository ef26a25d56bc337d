/// Parameters of the interior-point solver
#[derive(Clone, Debug)]
pub struct Params {
    /// Maximum number of outer Newton iterations
    pub max_iter: usize,
    /// Multiplier of the barrier parameter update
    pub mu_factor: f64,
    /// Threshold on the primal and dual residuals
    pub feasible_threshold: f64,
    /// Threshold on the surrogate duality gap
    pub surrogate_gap_threshold: f64,
    /// Numerical floor for distances to the box bounds
    pub x_epsilon: f64,
    /// Box bound for rows with a positive label
    pub c_pos: f64,
    /// Box bound for rows with a negative label
    pub c_neg: f64,
    /// Regularization folded into the implicit kernel matrix
    pub tradeoff: f64,
    /// Frequency of logging (`0` for no logging)
    pub verbose: usize,
    /// Time limit (in seconds)
    pub time_limit: f64,
}

impl Params {
    /// Creates a new [`Params`] struct with default parameter values.
    pub fn new() -> Self {
        Params {
            max_iter: 200,
            mu_factor: 10.0,
            feasible_threshold: 1e-8,
            surrogate_gap_threshold: 1e-3,
            x_epsilon: 1e-9,
            c_pos: 1.0,
            c_neg: 1.0,
            tradeoff: 0.0,
            verbose: 0,
            time_limit: f64::INFINITY,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::new()
    }
}
