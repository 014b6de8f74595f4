//! Similarity graph construction: affinity, degree and normalization stages.
//!
//! The three stages turn a point set into the matrix the factorization
//! solver approximates:
//!
//! ```text
//! X (n×d) ──similarity──▶ A (n×n)   A_ij = exp(-‖x_i - x_j‖² / 2), A_ii = 0
//!         ──degree──────▶ D (n×n)   D_ii = Σ_j A_ij, zero elsewhere
//!         ──normalize───▶ W (n×n)   W = D^{-1/2} · A · D^{-1/2}
//! ```
//!
//! `W` is the symmetrically normalized adjacency used by normalized spectral
//! clustering (the `L_sym = I - W` Laplacian). Each stage borrows its inputs
//! and returns a freshly allocated matrix.
//!
//! # Degenerate graphs
//!
//! A point whose similarity to every other point underflows to zero (or a
//! single-point input) has degree 0, and `D^{-1/2}` is undefined for it.
//! [`normalize`] reports this as [`Error::DegenerateInput`](crate::Error)
//! instead of producing `inf`/`NaN`.

mod degree;
mod normalize;
mod similarity;

pub use degree::degree;
pub use normalize::normalize;
pub use similarity::similarity;
