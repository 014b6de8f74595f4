use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Damping constant of the multiplicative update.
pub const BETA: f64 = 0.5;

/// One damped multiplicative update of `h` toward `W ≈ H·Hᵗ`.
///
/// ```text
/// H'[i][j] = H[i][j] · (1 - β + β · (W·H)[i][j] / (H·Hᵗ·H)[i][j])
/// ```
///
/// Cells whose denominator is exactly zero, or whose correction factor is
/// not finite (a subnormal denominator can overflow the ratio), keep their
/// current value. The returned matrix is freshly allocated; `h` is left
/// untouched.
pub fn update_step(h: &Matrix, w: &Matrix) -> Result<Matrix> {
    multiplicative_update(h, w).map(|(next, _)| next)
}

/// [`update_step`] plus the number of cells left unchanged.
pub(crate) fn multiplicative_update(h: &Matrix, w: &Matrix) -> Result<(Matrix, usize)> {
    if !w.is_square() {
        return Err(Error::shape((w.nrows(), w.nrows()), w.shape()));
    }
    if h.nrows() != w.nrows() {
        return Err(Error::shape((w.nrows(), h.ncols()), h.shape()));
    }

    let numerator = w.multiply(h)?;
    // (H·Hᵗ)·H, in that order, so that W == H·Hᵗ gives a ratio of exactly 1.
    let denominator = h.multiply(&h.transpose()?)?.multiply(h)?;

    let (n, k) = h.shape();
    let mut next = Matrix::zeros(n, k)?;
    let mut frozen = 0;
    {
        let out = next.data_mut();
        for i in 0..n {
            for j in 0..k {
                let den = denominator[(i, j)];
                let factor = 1.0 - BETA + BETA * numerator[(i, j)] / den;
                out[[i, j]] = if den == 0.0 || !factor.is_finite() {
                    frozen += 1;
                    h[(i, j)]
                } else {
                    h[(i, j)] * factor
                };
            }
        }
    }
    Ok((next, frozen))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_fixed_point() {
        // W = H·Hᵗ exactly, so every ratio is 1 and H is a fixed point.
        let h = Matrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0], vec![0.25, 0.25]]).unwrap();
        let w = h.multiply(&h.transpose().unwrap()).unwrap();
        let next = update_step(&h, &w).unwrap();
        assert_eq!(next, h);
    }

    #[test]
    fn test_update_hand_computed() {
        // H = [1, 1]ᵗ: W·H = [4, 4], H·Hᵗ·H = [2, 2], ratio 2, factor 1.5.
        let h = Matrix::from_rows(&[vec![1.0], vec![1.0]]).unwrap();
        let w = Matrix::from_rows(&[vec![0.0, 4.0], vec![4.0, 0.0]]).unwrap();
        let next = update_step(&h, &w).unwrap();
        assert_eq!(next.to_rows(), vec![vec![1.5], vec![1.5]]);
    }

    #[test]
    fn test_zero_denominator_keeps_cell() {
        // Second column of H is zero, so H·Hᵗ·H is zero there too.
        let h = Matrix::from_rows(&[vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap();
        let w = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let (next, frozen) = multiplicative_update(&h, &w).unwrap();

        assert_eq!(frozen, 2);
        assert_eq!(next[(0, 1)], 0.0);
        assert_eq!(next[(1, 1)], 0.0);
        assert!(next.view().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_overflowing_ratio_keeps_cell() {
        // H·Hᵗ·H = 1e-321 is subnormal but non-zero; W·H / that overflows.
        let h = Matrix::from_rows(&[vec![1e-107]]).unwrap();
        let w = Matrix::from_rows(&[vec![1e100]]).unwrap();
        let (next, frozen) = multiplicative_update(&h, &w).unwrap();

        assert_eq!(frozen, 1);
        assert_eq!(next, h);
    }

    #[test]
    fn test_update_preserves_non_negativity() {
        let h = Matrix::from_rows(&[vec![0.2, 0.9], vec![0.7, 0.1], vec![0.4, 0.4]]).unwrap();
        let w = Matrix::from_rows(&[
            vec![0.0, 0.6, 0.1],
            vec![0.6, 0.0, 0.3],
            vec![0.1, 0.3, 0.0],
        ])
        .unwrap();
        let mut cur = h;
        for _ in 0..20 {
            cur = update_step(&cur, &w).unwrap();
            assert!(cur.view().iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_update_shape_errors() {
        let h = Matrix::zeros(3, 2).unwrap();
        let w = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(update_step(&h, &w), Err(Error::ShapeMismatch { .. })));

        let rect = Matrix::zeros(3, 2).unwrap();
        assert!(matches!(update_step(&h, &rect), Err(Error::ShapeMismatch { .. })));
    }
}
