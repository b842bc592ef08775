use ndarray::{Array1, Array2};
use std::ops::Index;

/// Partition of point indices, one group per centroid slot
pub type Clusters = Vec<Vec<usize>>;

/// Snapshot of one iteration, taken before the centroids move.
///
/// `centroids` are the positions the assignment was computed against, and
/// `clusters` is that assignment. The next step's centroids are the means of
/// these clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub centroids: Array2<f64>,
    pub clusters: Clusters,
}

impl Step {
    /// Number of centroid slots
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// Total number of assigned points
    pub fn n_points(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Per-point slot labels, indexed by point
    pub fn labels(&self) -> Array1<usize> {
        let mut labels = Array1::zeros(self.n_points());
        for (slot, members) in self.clusters.iter().enumerate() {
            for &idx in members {
                labels[idx] = slot;
            }
        }
        labels
    }
}

/// How a fit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// Centroids stopped moving within tolerance
    Converged,
    /// The step budget ran out first
    StepBudgetExhausted,
}

/// Ordered record of every step produced by one fit
#[derive(Debug, Clone, PartialEq)]
pub struct StepHistory {
    steps: Vec<Step>,
    outcome: FitOutcome,
}

impl StepHistory {
    pub(crate) fn new(steps: Vec<Step>, outcome: FitOutcome) -> Self {
        Self { steps, outcome }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn outcome(&self) -> FitOutcome {
        self.outcome
    }

    pub fn is_converged(&self) -> bool {
        self.outcome == FitOutcome::Converged
    }
}

impl Index<usize> for StepHistory {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a StepHistory {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_labels_from_clusters() {
        let step = Step {
            centroids: array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]],
            clusters: vec![vec![1, 3], vec![], vec![0, 2, 4]],
        };

        assert_eq!(step.k(), 3);
        assert_eq!(step.n_points(), 5);
        assert_eq!(step.labels(), array![2, 0, 2, 0, 2]);
    }

    #[test]
    fn test_history_accessors() {
        let step = Step {
            centroids: array![[0.0, 0.0]],
            clusters: vec![vec![0]],
        };
        let history = StepHistory::new(vec![step.clone(), step], FitOutcome::Converged);

        assert_eq!(history.len(), 2);
        assert!(history.is_converged());
        assert_eq!(history[1], history.steps()[1]);
        assert_eq!(history.iter().count(), 2);
        assert!(history.get(2).is_none());
    }
}
