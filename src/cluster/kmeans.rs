//! K-means clustering.
//!
//! Partitions points into k clusters by minimizing **within-cluster sum of
//! squares** (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Take the first k points as the initial centroids
//! 2. **Assign**: each point → nearest centroid (ties → lowest index)
//! 3. **Update**: each centroid → mean of its assigned points
//! 4. Repeat until centroids stop moving or `max_iter` is reached
//!
//! Seeding with the first k points makes the result fully deterministic,
//! at the price of sensitivity to input order. A cluster that loses all its
//! points keeps its previous centroid.
//!
//! Here k-means is the baseline SymNMF is measured against: it sees only
//! Euclidean centroids, so it misses structure the similarity graph picks up.

use log::debug;

use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::matrix::{squared_distance, Matrix};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on the summed squared centroid shift.
    tol: f64,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    fn validate(&self, n: usize) -> Result<()> {
        if self.k <= 1 || self.k >= n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be a non-negative number",
            });
        }
        Ok(())
    }

    fn nearest(&self, points: &Matrix, i: usize, centroids: &Matrix) -> Result<usize> {
        let point = points.row(i);
        let mut best_cluster = 0;
        let mut best_dist = f64::INFINITY;
        for c in 0..self.k {
            let dist = squared_distance(point, centroids.row(c))?;
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }
        Ok(best_cluster)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, points: &Matrix) -> Result<Vec<usize>> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let (n, d) = points.shape();
        self.validate(n)?;

        let mut centroids = Matrix::zeros(self.k, d)?;
        centroids
            .data_mut()
            .assign(&points.view().slice(ndarray::s![..self.k, ..]));
        let mut labels = vec![0usize; n];

        for iteration in 1..=self.max_iter {
            // Assignment step - parallel when feature enabled
            #[cfg(feature = "parallel")]
            {
                let centroids_ref = &centroids;
                labels
                    .par_iter_mut()
                    .enumerate()
                    .try_for_each(|(i, label)| {
                        *label = self.nearest(points, i, centroids_ref)?;
                        Ok::<(), Error>(())
                    })?;
            }

            #[cfg(not(feature = "parallel"))]
            for (i, label) in labels.iter_mut().enumerate() {
                *label = self.nearest(points, i, &centroids)?;
            }

            // Update step
            let mut new_centroids = Matrix::zeros(self.k, d)?;
            let mut counts = vec![0usize; self.k];
            {
                let sums = new_centroids.data_mut();
                for (i, &c) in labels.iter().enumerate() {
                    for j in 0..d {
                        sums[[c, j]] += points[(i, j)];
                    }
                    counts[c] += 1;
                }
                for c in 0..self.k {
                    for j in 0..d {
                        sums[[c, j]] = if counts[c] > 0 {
                            sums[[c, j]] / counts[c] as f64
                        } else {
                            centroids[(c, j)]
                        };
                    }
                }
            }

            let shift = squared_shift(&centroids, &new_centroids);
            centroids = new_centroids;

            if shift < self.tol {
                debug!("k-means converged after {iteration} iterations");
                break;
            }
        }

        Ok(labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

fn squared_shift(old: &Matrix, new: &Matrix) -> f64 {
    old.view()
        .iter()
        .zip(new.view().iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}
