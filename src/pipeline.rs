//! Goal-driven orchestration of the graph stages and the solver.
//!
//! Two entry points form the whole call surface:
//!
//! - [`run`] takes a [`Goal`] and a point set and returns exactly one of
//!   `A`, `D` or `W`. Intermediates are dropped inside the call.
//! - [`factorize`] takes a starting factor, `W`, `eps` and an iteration
//!   budget and returns the factorization outcome.
//!
//! [`run_rows`] and [`factorize_rows`] are the same operations over plain
//! row vectors, for callers that marshal data across a language or process
//! boundary. There the goal arrives as a string token and is validated once.
//!
//! # Example
//!
//! ```rust
//! use symnmf::pipeline::{run, Goal};
//! use symnmf::Matrix;
//!
//! let points = Matrix::from_rows(&[vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap();
//! let d = run(Goal::Degree, points).unwrap();
//! assert!((d[(0, 0)] - 1.0).abs() < 1e-12);
//! assert_eq!(d[(0, 1)], 0.0);
//!
//! let goal: Goal = "norm".parse().unwrap();
//! assert_eq!(goal, Goal::Normalized);
//! assert!("symnmf".parse::<Goal>().is_err());
//! ```

use core::fmt;
use core::str::FromStr;

use log::debug;

use crate::error::{Error, Result};
use crate::factor::{FactorConfig, Factorization};
use crate::graph::{degree, normalize, similarity};
use crate::matrix::Matrix;

/// Which matrix a pipeline call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    /// Affinity matrix `A` (token `sym`).
    #[cfg_attr(feature = "serde", serde(rename = "sym"))]
    Similarity,
    /// Diagonal degree matrix `D` (token `ddg`).
    #[cfg_attr(feature = "serde", serde(rename = "ddg"))]
    Degree,
    /// Normalized similarity `W` (token `norm`).
    #[cfg_attr(feature = "serde", serde(rename = "norm"))]
    Normalized,
}

impl Goal {
    /// Short token naming the goal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Similarity => "sym",
            Goal::Degree => "ddg",
            Goal::Normalized => "norm",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sym" => Ok(Goal::Similarity),
            "ddg" => Ok(Goal::Degree),
            "norm" => Ok(Goal::Normalized),
            other => Err(Error::UnknownGoal {
                goal: other.to_string(),
            }),
        }
    }
}

/// Compute the matrix named by `goal` from an `n × d` point set.
///
/// Consumes the point set; the returned matrix is `n × n`.
pub fn run(goal: Goal, points: Matrix) -> Result<Matrix> {
    debug!(
        "running goal '{goal}' on {} points of dimension {}",
        points.nrows(),
        points.ncols()
    );
    let a = similarity(&points)?;
    drop(points);
    if goal == Goal::Similarity {
        return Ok(a);
    }

    let d = degree(&a)?;
    if goal == Goal::Degree {
        return Ok(d);
    }

    normalize(&d, &a)
}

/// Factor `w ≈ H·Hᵗ` from `initial_h` with the given threshold and budget.
///
/// `initial_h` is borrowed and left unchanged.
pub fn factorize(
    initial_h: &Matrix,
    w: &Matrix,
    eps: f64,
    max_iter: usize,
) -> Result<Factorization> {
    FactorConfig::new()
        .with_eps(eps)
        .with_max_iter(max_iter)
        .factorize(initial_h, w)
}

/// [`run`] over row vectors, with the goal given as `sym`, `ddg` or `norm`.
pub fn run_rows(goal: &str, points: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let goal = goal.parse::<Goal>()?;
    let x = Matrix::from_rows(points)?;
    Ok(run(goal, x)?.to_rows())
}

/// [`factorize`] over row vectors, returning the final factor.
pub fn factorize_rows(
    initial_h: &[Vec<f64>],
    w: &[Vec<f64>],
    eps: f64,
    max_iter: usize,
) -> Result<Vec<Vec<f64>>> {
    let h = Matrix::from_rows(initial_h)?;
    let w = Matrix::from_rows(w)?;
    Ok(factorize(&h, &w, eps, max_iter)?.h.to_rows())
}
