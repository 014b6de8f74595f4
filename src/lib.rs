//! # symnmf
//!
//! Graph-based clustering by symmetric non-negative matrix factorization.
//!
//! Points in Euclidean space become a Gaussian similarity graph, the graph
//! is degree-normalized into `W`, and `W` is factored as `H·Hᵗ` with a
//! non-negative `H` (n×k) by a damped multiplicative update. Row `i` of
//! `H` says how strongly point `i` belongs to each of the `k` clusters.
//!
//! ```text
//! X ──similarity──▶ A ──degree──▶ D ──normalize──▶ W ──factorize(H₀)──▶ H
//! ```
//!
//! [`pipeline`] exposes the staged computation (`sym`, `ddg`, `norm`) and
//! the solver as the crate's two entry points; [`cluster::SymNmf`] runs the
//! whole thing end to end.
//!
//! **Default build** is single-threaded. The `parallel` feature fills the
//! similarity matrix row-parallel with rayon; results are bit-identical.
//! The `std` feature (on by default) only adds the `std::error::Error` impl
//! for [`Error`]; the crate itself always depends on `std`.

pub mod cluster;
/// Error types used across `symnmf`.
pub mod error;
pub mod factor;
pub mod graph;
pub mod matrix;
pub mod metrics;
pub mod pipeline;


pub use crate::cluster::{Clustering, Kmeans, SoftClustering, SymNmf, SymNmfFit};
pub use crate::factor::{FactorConfig, Factorization, Termination};
pub use crate::matrix::{frobenius_distance, squared_distance, Matrix};
pub use crate::pipeline::{factorize, run, Goal};

pub use error::{Error, Result};
pub use metrics::silhouette_score;
