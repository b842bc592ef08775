use crate::init::InitMethod;

/// Configuration for a k-means run
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Centroid initialization policy
    pub init: InitMethod,

    /// Step budget used by [`crate::KMeans::fit_default`]. Every step is one
    /// assignment plus one centroid update.
    pub max_steps: usize,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Absolute tolerance of the convergence test
    pub atol: f64,

    /// Relative tolerance of the convergence test
    pub rtol: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            init: InitMethod::Random,
            max_steps: 100,
            seed: 0,
            atol: 1e-6,
            rtol: 1e-6,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the initialization policy
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set the step budget
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the absolute and relative convergence tolerances
    pub fn with_tolerance(mut self, atol: f64, rtol: f64) -> Self {
        self.atol = atol;
        self.rtol = rtol;
        self
    }
}
