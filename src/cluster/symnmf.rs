//! End-to-end clustering by symmetric non-negative matrix factorization.
//!
//! Points are turned into the normalized similarity `W`, a random
//! non-negative `H` (n×k) is drawn, and `H` is refined until `W ≈ H·Hᵗ`.
//! Row `i` of `H` then holds point i's association with each of the `k`
//! clusters; its largest entry is the hard label.
//!
//! Compared with spectral clustering (eigenvectors of `L_sym`, then
//! k-means), the factor is directly interpretable: no eigendecomposition,
//! no second clustering pass, and non-negative soft memberships for free.

use log::debug;

use super::traits::{Clustering, SoftClustering};
use crate::error::{Error, Result};
use crate::factor::{initialize_h, FactorConfig, Factorization, DEFAULT_EPS, DEFAULT_MAX_ITER};
use crate::graph::{degree, normalize, similarity};
use crate::matrix::Matrix;

/// SymNMF clusterer.
#[derive(Debug, Clone)]
pub struct SymNmf {
    /// Number of clusters.
    k: usize,
    /// Convergence threshold.
    eps: f64,
    /// Maximum solver iterations.
    max_iter: usize,
    /// Seed for the starting factor.
    seed: u64,
}

/// Everything a [`SymNmf::fit`] run produces.
#[derive(Debug, Clone)]
pub struct SymNmfFit {
    /// Normalized similarity the factor approximates.
    pub w: Matrix,
    /// Solver outcome, including the final `H`.
    pub factorization: Factorization,
}

impl SymNmfFit {
    /// Hard label per point.
    pub fn labels(&self) -> Vec<usize> {
        self.factorization.labels()
    }
}

impl SymNmf {
    /// Create a new clusterer for `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            eps: DEFAULT_EPS,
            max_iter: DEFAULT_MAX_ITER,
            seed: 0,
        }
    }

    /// Set convergence threshold.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for the starting factor.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit to an `n × d` point set.
    pub fn fit(&self, points: &Matrix) -> Result<SymNmfFit> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = points.nrows();
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        let config = FactorConfig::new()
            .with_eps(self.eps)
            .with_max_iter(self.max_iter);
        config.validate()?;

        let w = {
            let a = similarity(points)?;
            let d = degree(&a)?;
            normalize(&d, &a)?
        };
        let h0 = initialize_h(&w, self.k, self.seed)?;
        let factorization = config.factorize(&h0, &w)?;

        debug!(
            "symnmf: k = {}, {:?} after {} iterations",
            self.k, factorization.termination, factorization.iterations
        );
        Ok(SymNmfFit { w, factorization })
    }
}

impl Clustering for SymNmf {
    fn fit_predict(&self, points: &Matrix) -> Result<Vec<usize>> {
        Ok(self.fit(points)?.labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

impl SoftClustering for SymNmf {
    fn fit_predict_proba(&self, points: &Matrix) -> Result<Matrix> {
        let mut h = self.fit(points)?.factorization.h;
        let k = h.ncols();
        for mut row in h.data_mut().rows_mut() {
            let total: f64 = row.iter().sum();
            if total > 0.0 {
                row.mapv_inplace(|v| v / total);
            } else {
                row.fill(1.0 / k as f64);
            }
        }
        Ok(h)
    }
}
