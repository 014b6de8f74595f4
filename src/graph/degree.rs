use log::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Diagonal degree matrix of an affinity matrix.
///
/// `D[i][i]` is the left-to-right row sum of `a`; every other cell is zero.
pub fn degree(a: &Matrix) -> Result<Matrix> {
    if a.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !a.is_square() {
        return Err(Error::shape((a.nrows(), a.nrows()), a.shape()));
    }

    let n = a.nrows();
    let mut d = Matrix::zeros(n, n)?;
    for i in 0..n {
        d.data_mut()[[i, i]] = a.row_sum(i).unwrap_or_default();
    }

    debug!("degree matrix built for {n} nodes");
    Ok(d)
}
