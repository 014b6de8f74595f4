//! Clustering traits.

use crate::error::Result;
use crate::matrix::Matrix;

/// A clusterer that assigns every point to exactly one cluster.
pub trait Clustering {
    /// Fit to an `n × d` point set and return one label in `0..k` per row.
    fn fit_predict(&self, points: &Matrix) -> Result<Vec<usize>>;

    /// Number of clusters `k`.
    fn n_clusters(&self) -> usize;

    /// [`fit_predict`](Clustering::fit_predict) over row vectors.
    fn fit_predict_rows(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        self.fit_predict(&Matrix::from_rows(data)?)
    }
}

/// A clusterer that spreads each point's membership over the clusters.
pub trait SoftClustering: Clustering {
    /// Fit and return an `n × k` matrix whose row `i` holds point i's share
    /// of membership in each cluster; every row sums to 1.
    fn fit_predict_proba(&self, points: &Matrix) -> Result<Matrix>;
}
