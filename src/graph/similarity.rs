use log::debug;

use crate::error::{Error, Result};
use crate::matrix::{alloc_buffer, squared_distance, Matrix};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Gaussian affinity matrix of a point set.
///
/// `points` is `n × d`, one point per row. The result is `n × n` with
/// `A[i][j] = exp(-‖x_i - x_j‖² / 2)` off the diagonal and zeros on it.
///
/// Both halves are computed from the same per-pair distance, which is
/// bitwise symmetric, so `A` is exactly symmetric. Rows are independent and
/// are filled in parallel with the `parallel` feature; the output is
/// identical either way.
pub fn similarity(points: &Matrix) -> Result<Matrix> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = points.nrows();
    let mut buf = alloc_buffer(n, n)?;

    #[cfg(feature = "parallel")]
    buf.par_chunks_mut(n)
        .enumerate()
        .try_for_each(|(i, row)| fill_row(points, i, row))?;

    #[cfg(not(feature = "parallel"))]
    buf.chunks_mut(n)
        .enumerate()
        .try_for_each(|(i, row)| fill_row(points, i, row))?;

    debug!(
        "similarity matrix built for {n} points in {} dimensions",
        points.ncols()
    );
    Matrix::from_shape_vec(n, n, buf)
}

fn fill_row(points: &Matrix, i: usize, row: &mut [f64]) -> Result<()> {
    let xi = points.row(i);
    for (j, cell) in row.iter_mut().enumerate() {
        *cell = if i == j {
            0.0
        } else {
            (-squared_distance(xi, points.row(j))? / 2.0).exp()
        };
    }
    Ok(())
}
