//! Symmetric non-negative factorization `W ≈ H·Hᵗ`.
//!
//! Given a symmetric, non-negative `W` (n×n) and a non-negative starting
//! factor `H` (n×k), the solver repeats a damped multiplicative update
//! until successive iterates are closer than `eps` in Frobenius distance,
//! or until the iteration budget runs out.
//!
//! # The Update
//!
//! ```text
//! H'[i][j] = H[i][j] · (1 - β + β · (W·H)[i][j] / (H·Hᵗ·H)[i][j]),   β = 1/2
//! ```
//!
//! The correction factor is never negative while `W` and `H` are
//! non-negative, so non-negativity carries from one iterate to the next.
//! A cell whose denominator is exactly zero (a zero column of `H` zeroes
//! the matching column of `H·Hᵗ·H`) is left unchanged rather than turned
//! into `NaN`.
//!
//! # Stopping
//!
//! After each update the solver measures `‖H' - H‖_F`. Falling below `eps`
//! ends the run as [`Termination::Converged`]. Running out of iterations is
//! not an error: the last iterate comes back tagged
//! [`Termination::MaxIterReached`].
//!
//! # Ownership
//!
//! The starting factor is borrowed and never modified; the caller keeps it.
//! Each iteration allocates a fresh iterate and drops the previous one.
//!
//! # Example
//!
//! ```rust
//! use symnmf::factor::{FactorConfig, Termination};
//! use symnmf::Matrix;
//!
//! let h = Matrix::from_rows(&[vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
//! let w = h.multiply(&h.transpose().unwrap()).unwrap();
//!
//! let fit = FactorConfig::new().with_eps(1e-6).factorize(&h, &w).unwrap();
//! assert_eq!(fit.termination, Termination::Converged);
//! assert_eq!(fit.iterations, 1);
//! ```

mod init;
mod update;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::matrix::{frobenius_distance, Matrix};

pub use init::{assign_clusters, initialize_h};
pub use update::{update_step, BETA};

/// Default convergence threshold.
pub const DEFAULT_EPS: f64 = 1e-4;
/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 300;

/// How a factorization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Successive iterates came within `eps` of each other.
    Converged,
    /// The iteration budget ran out first.
    MaxIterReached,
}

/// Outcome of a factorization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    /// Final iterate (n×k).
    pub h: Matrix,
    /// Number of updates performed.
    pub iterations: usize,
    /// Frobenius distance between the last two iterates.
    pub delta: f64,
    /// Why the run stopped.
    pub termination: Termination,
}

impl Factorization {
    /// True when the run met the threshold.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Hard cluster label per point, see [`assign_clusters`].
    pub fn labels(&self) -> Vec<usize> {
        assign_clusters(&self.h)
    }
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorConfig {
    /// Convergence threshold on `‖H' - H‖_F`.
    eps: f64,
    /// Maximum number of updates.
    max_iter: usize,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorConfig {
    /// Defaults: `eps = 1e-4`, `max_iter = 300`.
    pub fn new() -> Self {
        Self {
            eps: DEFAULT_EPS,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Set convergence threshold.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set iteration budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Convergence threshold.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Iteration budget.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Reject settings the solver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.eps.is_nan() || self.eps < 0.0 {
            return Err(Error::InvalidParameter {
                name: "eps",
                message: "must be a non-negative number",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Factor `w ≈ H·Hᵗ` starting from `initial_h`.
    ///
    /// `w` must be square (n×n) and `initial_h` must be n×k with
    /// `1 <= k <= n` and finite, non-negative entries.
    pub fn factorize(&self, initial_h: &Matrix, w: &Matrix) -> Result<Factorization> {
        self.validate()?;
        check_inputs(initial_h, w)?;

        let mut h = initial_h.try_clone()?;
        let mut delta = f64::INFINITY;
        let mut warned = false;

        for iteration in 1..=self.max_iter {
            let (next, frozen) = update::multiplicative_update(&h, w)?;
            if frozen > 0 && !warned {
                warn!("{frozen} cells have a zero update denominator and were left unchanged");
                warned = true;
            }

            delta = frobenius_distance(&next, &h)?;
            trace!("iteration {iteration}: delta = {delta:e}");
            h = next;

            if delta < self.eps {
                debug!("converged after {iteration} iterations (delta = {delta:e})");
                return Ok(Factorization {
                    h,
                    iterations: iteration,
                    delta,
                    termination: Termination::Converged,
                });
            }
        }

        debug!(
            "iteration budget of {} exhausted (delta = {delta:e})",
            self.max_iter
        );
        Ok(Factorization {
            h,
            iterations: self.max_iter,
            delta,
            termination: Termination::MaxIterReached,
        })
    }
}

fn check_inputs(h: &Matrix, w: &Matrix) -> Result<()> {
    if w.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !w.is_square() {
        return Err(Error::shape((w.nrows(), w.nrows()), w.shape()));
    }
    let n = w.nrows();
    if h.nrows() != n {
        return Err(Error::shape((n, h.ncols()), h.shape()));
    }
    let k = h.ncols();
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }
    if h.view().iter().any(|&v| v < 0.0 || !v.is_finite()) {
        return Err(Error::InvalidParameter {
            name: "initial_h",
            message: "entries must be finite and non-negative",
        });
    }
    if w.view().iter().any(|&v| v < 0.0 || !v.is_finite()) {
        return Err(Error::InvalidParameter {
            name: "w",
            message: "entries must be finite and non-negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_w() -> Matrix {
        // Two tight groups {0, 1} and {2, 3}, weakly linked.
        Matrix::from_rows(&[
            vec![0.0, 0.9, 0.05, 0.05],
            vec![0.9, 0.0, 0.05, 0.05],
            vec![0.05, 0.05, 0.0, 0.9],
            vec![0.05, 0.05, 0.9, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_factor_converges_in_one_iteration() {
        let h = Matrix::from_rows(&[vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let w = h.multiply(&h.transpose().unwrap()).unwrap();

        let fit = FactorConfig::new().with_eps(1e-12).factorize(&h, &w).unwrap();
        assert!(fit.converged());
        assert_eq!(fit.iterations, 1);
        assert_eq!(fit.delta, 0.0);
        assert_eq!(fit.h, h);
    }

    #[test]
    fn test_caller_keeps_initial_h() {
        let w = block_w();
        let h0 = initialize_h(&w, 2, 3).unwrap();
        let snapshot = h0.clone();

        let fit = FactorConfig::new().factorize(&h0, &w).unwrap();
        assert_eq!(h0, snapshot);
        assert_ne!(fit.h, h0);
    }

    #[test]
    fn test_budget_exhaustion_is_not_an_error() {
        let w = block_w();
        let h0 = initialize_h(&w, 2, 3).unwrap();

        let fit = FactorConfig::new()
            .with_eps(0.0)
            .with_max_iter(5)
            .factorize(&h0, &w)
            .unwrap();
        assert_eq!(fit.termination, Termination::MaxIterReached);
        assert_eq!(fit.iterations, 5);
        assert!(fit.delta.is_finite());
    }

    #[test]
    fn test_converges_within_bound_and_separates_blocks() {
        let w = block_w();
        let h0 = initialize_h(&w, 2, 11).unwrap();

        let fit = FactorConfig::new()
            .with_eps(1e-5)
            .with_max_iter(5000)
            .factorize(&h0, &w)
            .unwrap();
        assert!(fit.converged(), "delta = {}", fit.delta);
        assert!(fit.h.view().iter().all(|&v| v >= 0.0));

        let labels = fit.labels();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_delta_trends_to_zero() {
        let w = block_w();
        let mut h = initialize_h(&w, 2, 5).unwrap();
        let mut deltas = Vec::new();
        for _ in 0..200 {
            let next = update_step(&h, &w).unwrap();
            deltas.push(frobenius_distance(&next, &h).unwrap());
            h = next;
        }
        let early: f64 = deltas[..10].iter().sum();
        let late: f64 = deltas[190..].iter().sum();
        assert!(late < early);
    }

    #[test]
    fn test_zero_column_stays_finite() {
        let w = block_w();
        let h0 = Matrix::from_rows(&[
            vec![0.5, 0.0],
            vec![0.4, 0.0],
            vec![0.1, 0.0],
            vec![0.2, 0.0],
        ])
        .unwrap();
        let fit = FactorConfig::new().with_max_iter(50).factorize(&h0, &w).unwrap();
        assert!(fit.h.view().iter().all(|v| v.is_finite()));
        for i in 0..4 {
            assert_eq!(fit.h[(i, 1)], 0.0);
        }
    }

    #[test]
    fn test_configuration_errors() {
        let w = block_w();
        let h0 = initialize_h(&w, 2, 3).unwrap();

        let err = FactorConfig::new().with_eps(-1.0).factorize(&h0, &w).unwrap_err();
        assert!(err.is_configuration());
        let err = FactorConfig::new().with_eps(f64::NAN).factorize(&h0, &w).unwrap_err();
        assert!(err.is_configuration());
        let err = FactorConfig::new().with_max_iter(0).factorize(&h0, &w).unwrap_err();
        assert!(err.is_configuration());

        let wide = Matrix::zeros(4, 5).unwrap();
        let err = FactorConfig::new().factorize(&wide, &w).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidClusterCount {
                requested: 5,
                n_items: 4
            }
        );

        let negative = Matrix::from_rows(&[vec![1.0], vec![-1.0], vec![1.0], vec![1.0]]).unwrap();
        assert!(FactorConfig::new()
            .factorize(&negative, &w)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_rejects_nan_or_negative_w() {
        let h = Matrix::from_rows(&[vec![0.5], vec![0.5]]).unwrap();

        let nan = Matrix::from_rows(&[vec![0.0, f64::NAN], vec![f64::NAN, 0.0]]).unwrap();
        let err = FactorConfig::new().factorize(&h, &nan).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                name: "w",
                message: "entries must be finite and non-negative"
            }
        );

        let inf = Matrix::from_rows(&[vec![0.0, f64::INFINITY], vec![1.0, 0.0]]).unwrap();
        assert!(FactorConfig::new().factorize(&h, &inf).unwrap_err().is_configuration());

        let negative = Matrix::from_rows(&[vec![0.0, -4.0], vec![-4.0, 0.0]]).unwrap();
        assert!(matches!(
            FactorConfig::new().factorize(&h, &negative),
            Err(Error::InvalidParameter { name: "w", .. })
        ));
    }

    #[test]
    fn test_shape_errors() {
        let w = block_w();
        let h = Matrix::zeros(3, 2).unwrap();
        assert!(matches!(
            FactorConfig::new().factorize(&h, &w),
            Err(Error::ShapeMismatch { .. })
        ));

        let rect = Matrix::zeros(4, 3).unwrap();
        let h = Matrix::zeros(4, 2).unwrap();
        assert!(matches!(
            FactorConfig::new().factorize(&h, &rect),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
