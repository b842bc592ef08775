use crate::distance::{squared_distances_to, update_min_distances};
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::seq::index;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Centroid initialization policy
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InitMethod {
    /// k distinct points drawn uniformly without replacement
    #[default]
    Random,
    /// Random seed point, then greedy farthest-point selection
    Farthest,
    /// Random seed point, then D²-weighted sampling
    KMeansPlusPlus,
    /// Centroids supplied by the caller, one row per cluster
    Manual(Array2<f64>),
}

impl InitMethod {
    /// Resolve a policy name as used by the interactive front-end
    /// (`random`, `farthest`, `kmeans++`, `manual`).
    ///
    /// `manual` requires `centroids`; the other names ignore them.
    pub fn from_name(name: &str, centroids: Option<Array2<f64>>) -> Result<Self, KMeansError> {
        match name {
            "random" => Ok(InitMethod::Random),
            "farthest" => Ok(InitMethod::Farthest),
            "kmeans++" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => centroids.map(InitMethod::Manual).ok_or_else(|| {
                KMeansError::InvalidConfiguration(
                    "manual initialization requires explicit centroids".to_string(),
                )
            }),
            other => Err(KMeansError::InvalidConfiguration(format!(
                "Unsupported initialization method: {}",
                other
            ))),
        }
    }

    /// Policy name, the inverse of [`InitMethod::from_name`]
    pub fn name(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Farthest => "farthest",
            InitMethod::KMeansPlusPlus => "kmeans++",
            InitMethod::Manual(_) => "manual",
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InitMethod::from_name(s, None)
    }
}

/// Choose `k` initial centroids from `data` under `method`.
///
/// Sampling policies never pick the same point index twice, so they need at
/// least `k` points. Manual centroids are validated and copied as given.
/// Points and manual centroids must have finite coordinates.
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    method: &InitMethod,
    rng: &mut R,
) -> Result<Array2<f64>, KMeansError> {
    let n_samples = data.nrows();

    if k == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "k must be greater than 0".to_string(),
        ));
    }

    ensure_finite(data, "points")?;

    let indices = match method {
        InitMethod::Manual(centroids) => {
            if centroids.nrows() != k {
                return Err(KMeansError::InvalidConfiguration(format!(
                    "Expected {} manual centroids, got {}",
                    k,
                    centroids.nrows()
                )));
            }
            if centroids.ncols() != data.ncols() {
                return Err(KMeansError::InvalidDimensions(format!(
                    "Expected centroids with {} features, got {}",
                    data.ncols(),
                    centroids.ncols()
                )));
            }
            ensure_finite(&centroids.view(), "manual centroids")?;
            return Ok(centroids.clone());
        }
        _ if n_samples < k => {
            return Err(KMeansError::InvalidConfiguration(format!(
                "Number of samples ({}) is less than k ({})",
                n_samples, k
            )));
        }
        InitMethod::Random => random_indices(n_samples, k, rng),
        InitMethod::Farthest => farthest_indices(data, k, rng),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus_indices(data, k, rng)?,
    };

    tracing::debug!(method = %method, ?indices, "selected initial centroids");

    Ok(data.select(Axis(0), &indices))
}

fn ensure_finite(values: &ArrayView2<f64>, what: &str) -> Result<(), KMeansError> {
    match values.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), v)) => Err(KMeansError::InvalidConfiguration(format!(
            "{} contain a non-finite coordinate {} at ({}, {})",
            what, v, row, col
        ))),
        None => Ok(()),
    }
}

fn random_indices<R: Rng + ?Sized>(n_samples: usize, k: usize, rng: &mut R) -> Vec<usize> {
    index::sample(rng, n_samples, k).into_vec()
}

fn farthest_indices<R: Rng + ?Sized>(data: &ArrayView2<f64>, k: usize, rng: &mut R) -> Vec<usize> {
    let n_samples = data.nrows();
    let mut chosen = vec![false; n_samples];

    let first = rng.gen_range(0..n_samples);
    chosen[first] = true;
    let mut indices = vec![first];
    let mut min_dists = squared_distances_to(data, &data.row(first));

    while indices.len() < k {
        let Some(next) = farthest_candidate(&min_dists, &chosen) else {
            break;
        };
        chosen[next] = true;
        indices.push(next);
        update_min_distances(&mut min_dists, &squared_distances_to(data, &data.row(next)));
    }

    indices
}

/// Unchosen index with the largest distance to its nearest centroid.
/// Strict `>` keeps the lowest index among equally distant points.
fn farthest_candidate(min_dists: &Array1<f64>, chosen: &[bool]) -> Option<usize> {
    let mut next = None;
    let mut best = f64::NEG_INFINITY;
    for (i, &dist) in min_dists.iter().enumerate() {
        if !chosen[i] && dist > best {
            best = dist;
            next = Some(i);
        }
    }
    next
}

fn kmeans_plus_plus_indices<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, KMeansError> {
    let n_samples = data.nrows();
    let mut chosen = vec![false; n_samples];

    let first = rng.gen_range(0..n_samples);
    chosen[first] = true;
    let mut indices = vec![first];
    let mut min_dists = squared_distances_to(data, &data.row(first));

    while indices.len() < k {
        let weights = d2_weights(&min_dists, &chosen);

        let next = match WeightedIndex::<f64>::new(weights.iter()) {
            Ok(dist) => dist.sample(rng),
            Err(WeightedError::AllWeightsZero) => {
                // Every remaining point coincides with a chosen centroid
                let candidates: Vec<usize> = (0..n_samples).filter(|&i| !chosen[i]).collect();
                tracing::warn!(
                    centroid = indices.len(),
                    candidates = candidates.len(),
                    "DegenerateSampling: all D² weights are zero, sampling uniformly"
                );
                candidates[rng.gen_range(0..candidates.len())]
            }
            Err(err) => {
                return Err(KMeansError::InvalidConfiguration(format!(
                    "kmeans++ sampling failed: {}",
                    err
                )));
            }
        };

        chosen[next] = true;
        indices.push(next);
        update_min_distances(&mut min_dists, &squared_distances_to(data, &data.row(next)));
    }

    Ok(indices)
}

/// Sampling weights for the unchosen points, scaled into `[0, 1]`.
///
/// Squared distances between far-apart finite points can overflow to
/// infinity; those points share all of the weight. Otherwise the weights are
/// divided by their maximum so that their sum stays finite.
fn d2_weights(min_dists: &Array1<f64>, chosen: &[bool]) -> Array1<f64> {
    let candidate = |i: usize, d: f64| if chosen[i] { 0.0 } else { d };

    let max = min_dists
        .iter()
        .enumerate()
        .map(|(i, &d)| candidate(i, d))
        .fold(0.0, f64::max);

    min_dists
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let w = candidate(i, d);
            if max.is_infinite() {
                if w.is_infinite() { 1.0 } else { 0.0 }
            } else if max > 0.0 {
                w / max
            } else {
                0.0
            }
        })
        .collect()
}
