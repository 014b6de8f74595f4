//! Dense, owned real matrices and the vector primitives built on them.
//!
//! [`Matrix`] is a thin owner around `ndarray::Array2<f64>`. Every operation
//! that produces a matrix allocates fresh storage; nothing returns a view
//! into another matrix's buffer. Storage is reserved with
//! [`Vec::try_reserve_exact`], so an allocation that cannot be satisfied
//! surfaces as [`Error::AllocationFailure`] instead of aborting, and no
//! partially built matrix ever escapes.
//!
//! # Example
//!
//! ```rust
//! use symnmf::Matrix;
//!
//! let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
//! let b = a.transpose().unwrap();
//!
//! let c = a.multiply(&b).unwrap();
//! assert_eq!(c.shape(), (2, 2));
//! assert_eq!(c[(0, 0)], 14.0);
//!
//! // 2x3 times 2x3 does not chain.
//! assert!(a.multiply(&a).is_err());
//! ```

use core::ops::Index;

use ndarray::linalg::general_mat_mul;
use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

use crate::error::{Error, Result};

/// Reserve a zero-filled buffer of `rows * cols` cells.
pub(crate) fn alloc_buffer(rows: usize, cols: usize) -> Result<Vec<f64>> {
    let elements = rows
        .checked_mul(cols)
        .ok_or(Error::AllocationFailure {
            elements: usize::MAX,
        })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| Error::AllocationFailure { elements })?;
    buf.resize(elements, 0.0);
    Ok(buf)
}

/// Owned row-major matrix of `f64`.
///
/// A matrix with zero rows or zero columns is the degenerate empty matrix;
/// it can be created and passed around but has no cells to index.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let buf = alloc_buffer(rows, cols)?;
        Self::from_shape_vec(rows, cols, buf)
    }

    /// `rows x cols` matrix seeded from `values`.
    ///
    /// `values` may be shorter than the target in either direction; cells
    /// not supplied are zero. Supplying more rows or columns than fit is an
    /// [`Error::DimensionMismatch`].
    pub fn with_values(rows: usize, cols: usize, values: &[Vec<f64>]) -> Result<Self> {
        if values.len() > rows {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: values.len(),
            });
        }
        let mut out = Self::zeros(rows, cols)?;
        for (i, row) in values.iter().enumerate() {
            if row.len() > cols {
                return Err(Error::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                out.data[[i, j]] = v;
            }
        }
        Ok(out)
    }

    /// Build from row vectors, which must all have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let d = rows.first().map_or(0, Vec::len);
        let mut buf = alloc_buffer(n, d)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: row.len(),
                });
            }
            buf[i * d..(i + 1) * d].copy_from_slice(row);
        }
        Self::from_shape_vec(n, d, buf)
    }

    /// Build from a row-major buffer of exactly `rows * cols` values.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let found = data.len();
        let data = Array2::from_shape_vec((rows, cols), data).map_err(|_| {
            Error::DimensionMismatch {
                expected: rows.saturating_mul(cols),
                found,
            }
        })?;
        Ok(Self { data })
    }

    /// Take ownership of an existing array.
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Give up ownership of the backing array.
    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Borrow the backing array.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Copy out as row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// True for the degenerate empty matrix.
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// True when `rows == cols`.
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Cell `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }

    /// Row `i` as a view.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows()`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.row(i)
    }

    /// Deep copy through the fallible allocator.
    pub fn try_clone(&self) -> Result<Self> {
        let mut out = Self::zeros(self.nrows(), self.ncols())?;
        out.data.assign(&self.data);
        Ok(out)
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Matrix) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(Error::shape(self.shape(), other.shape()));
        }
        let mut out = Self::zeros(self.nrows(), self.ncols())?;
        Zip::from(&mut out.data)
            .and(&self.data)
            .and(&other.data)
            .for_each(|o, &a, &b| *o = a + b);
        Ok(out)
    }

    /// Every entry multiplied by `scalar`.
    pub fn scale(&self, scalar: f64) -> Result<Self> {
        let mut out = self.try_clone()?;
        out.data.mapv_inplace(|v| v * scalar);
        Ok(out)
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Self> {
        if self.ncols() != other.nrows() {
            return Err(Error::ShapeMismatch {
                expected: format!("{}x_", self.ncols()),
                actual: format!("{}x{}", other.nrows(), other.ncols()),
            });
        }
        let mut out = Self::zeros(self.nrows(), other.ncols())?;
        general_mat_mul(1.0, &self.data, &other.data, 0.0, &mut out.data);
        Ok(out)
    }

    /// Fresh transposed copy.
    pub fn transpose(&self) -> Result<Self> {
        let mut out = Self::zeros(self.ncols(), self.nrows())?;
        out.data.assign(&self.data.t());
        Ok(out)
    }

    /// Left-to-right sum of row `i`, or `None` when out of range.
    pub fn row_sum(&self, i: usize) -> Option<f64> {
        (i < self.nrows()).then(|| self.data.row(i).iter().sum())
    }

    /// Top-to-bottom sum of column `j`, or `None` when out of range.
    pub fn col_sum(&self, j: usize) -> Option<f64> {
        (j < self.ncols()).then(|| self.data.column(j).iter().sum())
    }

    /// Square matrix holding `self[i][i]^p` on the diagonal.
    ///
    /// Off-diagonal cells of the result are written as zero regardless of
    /// what `self` holds there.
    pub fn diagonal_power(&self, p: f64) -> Result<Self> {
        if !self.is_square() {
            return Err(Error::shape((self.nrows(), self.nrows()), self.shape()));
        }
        let n = self.nrows();
        let mut out = Self::zeros(n, n)?;
        for i in 0..n {
            out.data[[i, i]] = self.data[[i, i]].powf(p);
        }
        Ok(out)
    }

    /// Arithmetic mean of all entries, `None` for the empty matrix.
    pub fn mean(&self) -> Option<f64> {
        self.data.mean()
    }

    /// True when square and `|a_ij - a_ji| <= tol` everywhere.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows();
        (0..n).all(|i| (i + 1..n).all(|j| (self.data[[i, j]] - self.data[[j, i]]).abs() <= tol))
    }

    pub(crate) fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[[i, j]]
    }
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum())
}

/// Frobenius distance `sqrt(Σ (a_ij - b_ij)²)` between same-shaped matrices.
pub fn frobenius_distance(a: &Matrix, b: &Matrix) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(Error::shape(a.shape(), b.shape()));
    }
    let sum: f64 = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    Ok(sum.sqrt())
}
