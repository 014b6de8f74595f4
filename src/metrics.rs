//! Clustering evaluation metrics.
//!
//! Internal measures score a clustering from the points alone, with no
//! ground truth. They are how two clusterers (say SymNMF and k-means) are
//! compared on the same data.
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Properties |
//! |--------|-------|------|------------|
//! | [`silhouette_score`] | [-1, 1] | 1 | Cohesion vs separation, Euclidean |
//!
//! # Example
//!
//! ```rust
//! use symnmf::metrics::silhouette_score;
//! use symnmf::Matrix;
//!
//! let points = Matrix::from_rows(&[
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 0.0],
//!     vec![10.0, 1.0],
//! ])
//! .unwrap();
//!
//! let good = silhouette_score(&points, &[0, 0, 1, 1]).unwrap();
//! let bad = silhouette_score(&points, &[0, 1, 0, 1]).unwrap();
//! assert!(good > 0.8);
//! assert!(bad < 0.0);
//! ```
//!
//! # References
//!
//! - Rousseeuw (1987). "Silhouettes: a graphical aid to the interpretation
//!   and validation of cluster analysis"

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::matrix::{squared_distance, Matrix};

/// Mean silhouette coefficient over all points.
///
/// For point `i` with cluster `C`:
///
/// ```text
/// a(i) = mean distance from i to the other members of C
/// b(i) = min over other clusters C' of mean distance from i to C'
/// s(i) = (b(i) - a(i)) / max(a(i), b(i))
/// ```
///
/// Points alone in their cluster score 0. Distances are Euclidean.
///
/// # Arguments
///
/// * `points` - n × d point set
/// * `labels` - cluster label per point
///
/// # Returns
///
/// Score in [-1, 1]. Higher is better.
///
/// # Errors
///
/// `labels.len()` must equal `n`, and the number of distinct labels must be
/// between 2 and `n - 1`.
pub fn silhouette_score(points: &Matrix, labels: &[usize]) -> Result<f64> {
    let n = points.nrows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }

    // Dense cluster ids in label order.
    let mut ids = BTreeMap::new();
    for &l in labels {
        let next = ids.len();
        ids.entry(l).or_insert(next);
    }
    let n_clusters = ids.len();
    if n_clusters < 2 || n_clusters >= n {
        return Err(Error::InvalidParameter {
            name: "labels",
            message: "number of distinct labels must be in 2..n",
        });
    }
    let cluster: Vec<usize> = labels.iter().map(|l| ids[l]).collect();
    let mut sizes = vec![0usize; n_clusters];
    for &c in &cluster {
        sizes[c] += 1;
    }

    let mut total = 0.0;
    let mut sums = vec![0.0; n_clusters];
    for i in 0..n {
        sums.fill(0.0);
        for j in 0..n {
            if i != j {
                sums[cluster[j]] += squared_distance(points.row(i), points.row(j))?.sqrt();
            }
        }

        let own = cluster[i];
        if sizes[own] == 1 {
            continue;
        }
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..n_clusters)
            .filter(|&c| c != own)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}
