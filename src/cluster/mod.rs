//! Clustering built on the similarity graph and its non-negative factor.
//!
//! ## Hard vs Soft Clustering
//!
//! **Hard clustering** assigns each point to exactly one cluster.
//! **Soft clustering** gives each point a distribution over clusters. SymNMF
//! yields both from the same factor `H`: the hard label of point `i` is the
//! column of its largest entry, and the soft membership is row `i` of `H`
//! rescaled to sum to 1.
//!
//! ## Algorithm
//!
//! ```text
//! 1. A = exp(-‖x_i - x_j‖² / 2), zero diagonal
//! 2. D = diag(row sums of A)
//! 3. W = D^{-1/2} A D^{-1/2}
//! 4. H₀ ~ U[0, 2·sqrt(mean(W) / k)]
//! 5. iterate H ← H ∘ (1 - β + β · (W H) / (H Hᵗ H))   until ‖ΔH‖_F < eps
//! 6. label_i = argmax_j H[i][j]
//! ```
//!
//! ## Baseline
//!
//! [`Kmeans`] clusters the raw points directly (Lloyd's algorithm seeded
//! with the first k points). Scoring both with
//! [`silhouette_score`](crate::metrics::silhouette_score) on the same data
//! shows what the graph factorization buys over plain centroids.
//!
//! ## Usage
//!
//! ```rust
//! use symnmf::cluster::{Clustering, SymNmf};
//! use symnmf::Matrix;
//!
//! let points = Matrix::from_rows(&[
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![6.0, 6.0],
//!     vec![6.1, 6.1],
//! ])
//! .unwrap();
//!
//! let labels = SymNmf::new(2).fit_predict(&points).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod symnmf;
mod traits;

pub use kmeans::Kmeans;
pub use symnmf::{SymNmf, SymNmfFit};
pub use traits::{Clustering, SoftClustering};
