use crate::algorithm::run_lloyd;
use crate::config::KMeansConfig;
use crate::distance::nearest_centroid;
use crate::error::KMeansError;
use crate::init::{initialize_centroids, InitMethod};
use crate::step::{Clusters, FitOutcome, StepHistory};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stepwise k-means engine.
///
/// Initial centroids are chosen once, when the engine is built. Each call to
/// [`KMeans::fit`] replays Lloyd's algorithm from those centroids and returns
/// the full [`StepHistory`], which callers can walk at their own pace.
///
/// # Example
///
/// ```
/// use kmeans_stepper::{InitMethod, KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
/// let config = KMeansConfig::new(2).with_init(InitMethod::Farthest).with_seed(7);
///
/// let mut kmeans = KMeans::new(points, config).unwrap();
/// let history = kmeans.fit(10).unwrap();
///
/// assert!(history.is_converged());
/// assert_eq!(history.last().unwrap().clusters.len(), 2);
/// assert_ne!(
///     kmeans.predict(&array![0.0, 0.2].view()).unwrap(),
///     kmeans.predict(&array![10.0, 0.8].view()).unwrap(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Point set, shape (n_samples, n_features)
    points: Array2<f64>,

    /// Centroids chosen at construction, shape (k, n_features)
    initial_centroids: Array2<f64>,

    /// Centroids after the last fit (initial centroids before any fit)
    centroids: Array2<f64>,

    /// Clusters from the last iteration of the last fit
    clusters: Option<Clusters>,

    /// How the last fit ended
    outcome: Option<FitOutcome>,
}

impl KMeans {
    /// Build an engine, drawing initial centroids from a `ChaCha8Rng`
    /// seeded with `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::InvalidConfiguration`] if `k` is 0, if a sampling
    /// policy is asked for more centroids than there are points, or if manual
    /// centroids do not number `k`.
    pub fn new(points: Array2<f64>, config: KMeansConfig) -> Result<Self, KMeansError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(points, config, &mut rng)
    }

    /// Build an engine, drawing initial centroids from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng<R: Rng + ?Sized>(
        points: Array2<f64>,
        config: KMeansConfig,
        rng: &mut R,
    ) -> Result<Self, KMeansError> {
        let initial_centroids = initialize_centroids(&points.view(), config.k, &config.init, rng)?;

        Ok(Self {
            centroids: initial_centroids.clone(),
            initial_centroids,
            points,
            config,
            clusters: None,
            outcome: None,
        })
    }

    /// Build an engine from a policy name, as received from a front-end.
    ///
    /// `manual_centroids` is required for `"manual"` and ignored otherwise.
    pub fn from_parts<R: Rng + ?Sized>(
        points: Array2<f64>,
        k: usize,
        method: &str,
        manual_centroids: Option<Array2<f64>>,
        rng: &mut R,
    ) -> Result<Self, KMeansError> {
        let init = InitMethod::from_name(method, manual_centroids)?;
        Self::with_rng(points, KMeansConfig::new(k).with_init(init), rng)
    }

    /// Run up to `max_steps` iterations and return the recorded history.
    ///
    /// Every call starts from the initial centroids, so repeated calls with
    /// the same budget return the same history. Afterwards the engine holds
    /// the final centroids and clusters.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::InvalidConfiguration`] if the point set is empty
    /// or `max_steps` is 0.
    pub fn fit(&mut self, max_steps: usize) -> Result<StepHistory, KMeansError> {
        if self.points.nrows() == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "Cannot fit an empty point set".to_string(),
            ));
        }
        if max_steps == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "max_steps must be at least 1".to_string(),
            ));
        }

        tracing::debug!(
            n_samples = self.points.nrows(),
            n_features = self.points.ncols(),
            k = self.config.k,
            init = %self.config.init,
            max_steps,
            "fitting k-means"
        );

        let result = run_lloyd(
            &self.points.view(),
            &self.initial_centroids.view(),
            max_steps,
            self.config.atol,
            self.config.rtol,
        );

        self.centroids = result.centroids;
        self.clusters = Some(result.clusters);
        self.outcome = Some(result.history.outcome());

        Ok(result.history)
    }

    /// [`KMeans::fit`] with the configured `max_steps`
    pub fn fit_default(&mut self) -> Result<StepHistory, KMeansError> {
        self.fit(self.config.max_steps)
    }

    /// Slot of the fitted centroid nearest to `point`; ties go to the lower slot.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotInitialized`] before the first fit and
    /// [`KMeansError::InvalidDimensions`] if `point` has the wrong width.
    pub fn predict(&self, point: &ArrayView1<f64>) -> Result<usize, KMeansError> {
        self.ensure_fitted()?;

        if point.len() != self.dim() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.dim(),
                point.len()
            )));
        }

        Ok(nearest_centroid(point, &self.centroids.view()))
    }

    /// Predict a slot for every row of `points`
    pub fn predict_many(&self, points: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.ensure_fitted()?;

        if points.ncols() != self.dim() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.dim(),
                points.ncols()
            )));
        }

        Ok(points
            .outer_iter()
            .map(|point| nearest_centroid(&point, &self.centroids.view()))
            .collect())
    }

    fn ensure_fitted(&self) -> Result<(), KMeansError> {
        match self.outcome {
            Some(_) => Ok(()),
            None => Err(KMeansError::NotInitialized),
        }
    }

    /// Current centroids: the fitted ones after a fit, the initial ones before
    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// Centroids chosen at construction
    pub fn initial_centroids(&self) -> &Array2<f64> {
        &self.initial_centroids
    }

    /// Clusters from the final iteration of the last fit
    pub fn clusters(&self) -> Option<&Clusters> {
        self.clusters.as_ref()
    }

    /// How the last fit ended, `None` before the first fit
    pub fn outcome(&self) -> Option<FitOutcome> {
        self.outcome
    }

    pub fn is_fitted(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (dimensions).
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn init(&self) -> &InitMethod {
        &self.config.init
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
