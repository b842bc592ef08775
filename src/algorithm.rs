use crate::distance::{centroids_allclose, max_centroid_shift, nearest_centroid};
use crate::step::{Clusters, FitOutcome, Step, StepHistory};
use ndarray::{Array2, ArrayView2, Axis};
use std::time::Instant;

/// Result of a stepwise Lloyd run
pub struct LloydResult {
    pub history: StepHistory,
    pub centroids: Array2<f64>,
    pub clusters: Clusters,
}

/// Assign every point to its nearest centroid.
///
/// Returns one group per centroid slot; indices inside a group are ascending
/// because points are visited in order.
pub fn assign_clusters(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> Clusters {
    let mut clusters = vec![Vec::new(); centroids.nrows()];
    for (idx, point) in data.outer_iter().enumerate() {
        clusters[nearest_centroid(&point, centroids)].push(idx);
    }
    clusters
}

/// Move each centroid to the mean of its cluster.
///
/// An empty cluster keeps its previous centroid.
pub fn update_centroids(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    clusters: &Clusters,
) -> Array2<f64> {
    let mut new_centroids = centroids.to_owned();

    for (slot, members) in clusters.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        if let Some(mean) = data.select(Axis(0), members).mean_axis(Axis(0)) {
            new_centroids.row_mut(slot).assign(&mean);
        }
    }

    new_centroids
}

/// Run Lloyd's algorithm from `initial_centroids` for at most `max_steps`
/// iterations, recording a [`Step`] before each centroid update.
///
/// Callers validate inputs: `data` is non-empty, `initial_centroids` has
/// `data.ncols()` columns and `max_steps >= 1`.
pub fn run_lloyd(
    data: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
    max_steps: usize,
    atol: f64,
    rtol: f64,
) -> LloydResult {
    let mut centroids = initial_centroids.to_owned();
    let mut clusters = Clusters::new();
    let mut steps = Vec::with_capacity(max_steps);
    let mut outcome = FitOutcome::StepBudgetExhausted;

    for step in 0..max_steps {
        let step_start = Instant::now();

        clusters = assign_clusters(data, &centroids.view());
        steps.push(Step {
            centroids: centroids.clone(),
            clusters: clusters.clone(),
        });

        let new_centroids = update_centroids(data, &centroids.view(), &clusters);
        let converged = centroids_allclose(&centroids.view(), &new_centroids.view(), atol, rtol);

        tracing::debug!(
            step = step + 1,
            max_steps,
            shift = max_centroid_shift(&centroids.view(), &new_centroids.view()),
            elapsed_us = step_start.elapsed().as_micros() as u64,
            "k-means step"
        );

        centroids = new_centroids;

        if converged {
            outcome = FitOutcome::Converged;
            break;
        }
    }

    tracing::info!(steps = steps.len(), ?outcome, "k-means run finished");

    LloydResult {
        history: StepHistory::new(steps, outcome),
        centroids,
        clusters,
    }
}
