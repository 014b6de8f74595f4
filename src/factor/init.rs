use rand::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::{alloc_buffer, Matrix};

/// Random non-negative starting factor for `w`.
///
/// Every entry of the `n × k` result is drawn uniformly from
/// `[0, 2·sqrt(m / k)]`, where `m` is the mean of all entries of `w`. The
/// same `seed` always yields the same matrix.
pub fn initialize_h(w: &Matrix, k: usize, seed: u64) -> Result<Matrix> {
    if w.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !w.is_square() {
        return Err(Error::shape((w.nrows(), w.nrows()), w.shape()));
    }
    let n = w.nrows();
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    let m = w.mean().unwrap_or_default();
    if m < 0.0 || !m.is_finite() {
        return Err(Error::InvalidParameter {
            name: "w",
            message: "mean entry must be finite and non-negative",
        });
    }
    let upper = 2.0 * (m / k as f64).sqrt();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = alloc_buffer(n, k)?;
    for v in buf.iter_mut() {
        *v = rng.random_range(0.0..=upper);
    }
    Matrix::from_shape_vec(n, k, buf)
}

/// Hard cluster label per row of `h`: the column holding the row maximum.
///
/// Ties resolve to the lowest column index.
pub fn assign_clusters(h: &Matrix) -> Vec<usize> {
    h.view()
        .outer_iter()
        .map(|row| {
            let mut best = 0;
            for (j, &v) in row.iter().enumerate() {
                if v > row[best] {
                    best = j;
                }
            }
            best
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w3() -> Matrix {
        Matrix::from_rows(&[
            vec![0.0, 0.5, 0.25],
            vec![0.5, 0.0, 0.5],
            vec![0.25, 0.5, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_initialize_h_bounds() {
        let w = w3();
        let h = initialize_h(&w, 2, 7).unwrap();
        assert_eq!(h.shape(), (3, 2));

        let upper = 2.0 * (w.mean().unwrap() / 2.0).sqrt();
        assert!(h.view().iter().all(|&v| (0.0..=upper).contains(&v)));
    }

    #[test]
    fn test_initialize_h_deterministic_with_seed() {
        let w = w3();
        assert_eq!(initialize_h(&w, 2, 42).unwrap(), initialize_h(&w, 2, 42).unwrap());
        assert_ne!(initialize_h(&w, 2, 42).unwrap(), initialize_h(&w, 2, 43).unwrap());
    }

    #[test]
    fn test_initialize_h_cluster_count() {
        let w = w3();
        assert!(matches!(
            initialize_h(&w, 0, 1),
            Err(Error::InvalidClusterCount { requested: 0, .. })
        ));
        assert!(matches!(
            initialize_h(&w, 4, 1),
            Err(Error::InvalidClusterCount { requested: 4, n_items: 3 })
        ));
    }

    #[test]
    fn test_initialize_h_rejects_negative_mean() {
        let w = Matrix::from_rows(&[vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap();
        assert!(initialize_h(&w, 1, 0).unwrap_err().is_configuration());
    }

    #[test]
    fn test_assign_clusters_argmax() {
        let h = Matrix::from_rows(&[
            vec![0.9, 0.1],
            vec![0.2, 0.8],
            vec![0.5, 0.5],
            vec![0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(assign_clusters(&h), vec![0, 1, 0, 0]);
    }
}
