use log::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Normalized similarity `W = D^{-1/2} · A · D^{-1/2}`.
///
/// Every diagonal entry of `d` must be strictly positive and finite; the
/// first one that is not is reported as [`Error::DegenerateInput`].
///
/// `T = D^{-1/2}` comes from [`Matrix::diagonal_power`]. Because `T` is
/// diagonal, `(T·A·T)[i][j] = (t_i · t_j) · a_ij`, which is evaluated
/// directly instead of through two dense products. The scale factor is
/// formed the same way for `(i, j)` and `(j, i)`, so `W` is exactly
/// symmetric whenever `A` is.
pub fn normalize(d: &Matrix, a: &Matrix) -> Result<Matrix> {
    if a.is_empty() || d.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !a.is_square() {
        return Err(Error::shape((a.nrows(), a.nrows()), a.shape()));
    }
    if d.shape() != a.shape() {
        return Err(Error::shape(a.shape(), d.shape()));
    }

    let n = a.nrows();
    for index in 0..n {
        let degree = d[(index, index)];
        if degree <= 0.0 || !degree.is_finite() {
            return Err(Error::DegenerateInput { index, degree });
        }
    }

    let t = d.diagonal_power(-0.5)?;
    let mut w = Matrix::zeros(n, n)?;
    {
        let out = w.data_mut();
        for i in 0..n {
            let ti = t[(i, i)];
            for j in 0..n {
                out[[i, j]] = (ti * t[(j, j)]) * a[(i, j)];
            }
        }
    }

    debug!("normalized similarity built for {n} nodes");
    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::degree;

    #[test]
    fn test_normalize_matches_dense_product() {
        let a = Matrix::from_rows(&[
            vec![0.0, 0.5, 0.25],
            vec![0.5, 0.0, 1.0],
            vec![0.25, 1.0, 0.0],
        ])
        .unwrap();
        let d = degree(&a).unwrap();
        let w = normalize(&d, &a).unwrap();

        let t = d.diagonal_power(-0.5).unwrap();
        let dense = t.multiply(&a).unwrap().multiply(&t).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!((w[(i, j)] - dense[(i, j)]).abs() < 1e-15);
            }
        }
        assert!(w.is_symmetric(0.0));
    }

    #[test]
    fn test_normalize_zero_degree_is_degenerate() {
        // Single point: A = [[0]], D = [[0]].
        let a = Matrix::zeros(1, 1).unwrap();
        let d = degree(&a).unwrap();
        assert_eq!(
            normalize(&d, &a),
            Err(Error::DegenerateInput {
                index: 0,
                degree: 0.0
            })
        );
    }

    #[test]
    fn test_normalize_reports_first_bad_degree() {
        let a = Matrix::from_rows(&[
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        let d = degree(&a).unwrap();
        assert!(matches!(
            normalize(&d, &a),
            Err(Error::DegenerateInput { index: 2, .. })
        ));
    }

    #[test]
    fn test_normalize_shape_checks() {
        let a = Matrix::zeros(2, 2).unwrap();
        let d = Matrix::zeros(3, 3).unwrap();
        assert!(matches!(normalize(&d, &a), Err(Error::ShapeMismatch { .. })));

        let rect = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(normalize(&rect, &rect), Err(Error::ShapeMismatch { .. })));
    }
}
