use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

/// Squared L2 distance between two points of equal width
#[inline]
pub fn squared_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    Zip::from(a).and(b).fold(0.0, |acc, &x, &y| {
        let d = x - y;
        acc + d * d
    })
}

/// Euclidean distance between two points of equal width
#[inline]
pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Slot of the centroid closest to `point`.
///
/// Uses a strict `<` comparison so that the lowest slot wins a tie.
/// `centroids` must have at least one row.
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> usize {
    let mut best_slot = 0;
    let mut best_dist = f64::INFINITY;

    for (slot, centroid) in centroids.outer_iter().enumerate() {
        let dist = euclidean_distance(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_slot = slot;
        }
    }

    best_slot
}

/// Squared distance from every row of `data` to `point`
pub fn squared_distances_to(data: &ArrayView2<f64>, point: &ArrayView1<f64>) -> Array1<f64> {
    data.outer_iter()
        .map(|row| squared_distance(&row, point))
        .collect()
}

/// Fold the distances to a newly chosen centroid into the running minimum
pub fn update_min_distances(min_dists: &mut Array1<f64>, new_dists: &Array1<f64>) {
    Zip::from(min_dists).and(new_dists).for_each(|m, &d| {
        if d < *m {
            *m = d;
        }
    });
}

/// Componentwise closeness test with numpy `allclose` semantics:
/// `|new - old| <= atol + rtol * |old|` for every coordinate.
pub fn centroids_allclose(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
    atol: f64,
    rtol: f64,
) -> bool {
    Zip::from(old_centroids)
        .and(new_centroids)
        .all(|&old, &new| (new - old).abs() <= atol + rtol * old.abs())
}

/// Largest L2 movement of any centroid between two iterations
pub fn max_centroid_shift(old_centroids: &ArrayView2<f64>, new_centroids: &ArrayView2<f64>) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| euclidean_distance(&old_c, &new_c))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_euclidean_distance() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];

        assert_relative_eq!(squared_distance(&a.view(), &b.view()), 25.0);
        assert_relative_eq!(euclidean_distance(&a.view(), &b.view()), 5.0);
    }

    #[test]
    fn test_nearest_centroid() {
        let centroids = array![[0.0, 0.0], [10.0, 10.0]];

        assert_eq!(nearest_centroid(&array![1.0, 1.0].view(), &centroids.view()), 0);
        assert_eq!(nearest_centroid(&array![9.0, 8.0].view(), &centroids.view()), 1);
    }

    #[test]
    fn test_nearest_centroid_tie_goes_to_lowest_slot() {
        let centroids = array![[-1.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

        // (0, 0) is at distance 1 from every centroid
        assert_eq!(nearest_centroid(&array![0.0, 0.0].view(), &centroids.view()), 0);

        let reversed = array![[1.0, 0.0], [-1.0, 0.0]];
        assert_eq!(nearest_centroid(&array![0.0, 0.0].view(), &reversed.view()), 0);
    }

    #[test]
    fn test_min_distances() {
        let data = array![[0.0, 0.0], [2.0, 0.0], [5.0, 0.0]];

        let mut min_dists = squared_distances_to(&data.view(), &data.row(0));
        assert_eq!(min_dists, array![0.0, 4.0, 25.0]);

        let to_last = squared_distances_to(&data.view(), &data.row(2));
        update_min_distances(&mut min_dists, &to_last);
        assert_eq!(min_dists, array![0.0, 4.0, 0.0]);
    }

    #[test]
    fn test_allclose() {
        let old = array![[0.0, 0.0], [100.0, 100.0]];

        let within = array![[5e-7, 0.0], [100.00005, 100.0]];
        assert!(centroids_allclose(&old.view(), &within.view(), 1e-6, 1e-6));

        let outside = array![[5e-6, 0.0], [100.0, 100.0]];
        assert!(!centroids_allclose(&old.view(), &outside.view(), 1e-6, 1e-6));
    }

    #[test]
    fn test_max_centroid_shift() {
        let old = array![[0.0, 0.0], [1.0, 1.0]];
        let new = array![[3.0, 4.0], [1.0, 2.0]];

        assert_relative_eq!(max_centroid_shift(&old.view(), &new.view()), 5.0);
    }
}
