//! Dense row-major matrix backed by `ndarray`

use std::fmt;

use ndarray::{s, Array2};

use crate::error::{MatrixError, Result};
use crate::matrix::csr::extent;
use crate::matrix::traits::{Matrix, Scalar};

/// A dense matrix that stores every cell, zeros included.
///
/// Unlike the compressed formats it accepts zero values (writing zero clears
/// a cell) and does not enumerate its nonzeros positionally; use
/// [`crate::convert_dense`] to move its contents into another format.
#[derive(Clone, Debug)]
pub struct DenseMatrix<T> {
    data: Array2<T>,
    nnz: usize,
}

impl<T: Scalar> DenseMatrix<T> {
    /// An empty 0 × 0 matrix
    pub fn new() -> Self {
        Self::zeros(0, 0)
    }

    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: Array2::from_elem((n_rows, n_cols), T::zero()),
            nnz: 0,
        }
    }

    /// Takes ownership of an existing array
    pub fn from_array(data: Array2<T>) -> Self {
        let nnz = data.iter().filter(|v| !v.is_zero()).count();
        Self { data, nnz }
    }

    /// Builds a matrix from nested rows; short rows are padded with zeros
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Array2::from_elem((rows.len(), n_cols), T::zero());
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[[i, j]] = v;
            }
        }
        Self::from_array(data)
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Number of cells holding a nonzero value
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data.get((row, col)).copied().unwrap_or_else(T::zero)
    }

    /// Writes `value` at (row, col), growing the array if needed
    ///
    /// Writing zero outside the current shape is a no-op.
    pub fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.n_rows() || col >= self.n_cols() {
            if value.is_zero() {
                return Ok(());
            }
            self.grow(
                self.n_rows().max(extent(row)?),
                self.n_cols().max(extent(col)?),
            )?;
        }

        let cell = &mut self.data[[row, col]];
        match (cell.is_zero(), value.is_zero()) {
            (true, false) => self.nnz += 1,
            (false, true) => self.nnz -= 1,
            _ => {}
        }
        *cell = value;
        Ok(())
    }

    pub fn declare_shape(&mut self, n_rows: usize, n_cols: usize) -> Result<()> {
        if n_rows > self.n_rows() || n_cols > self.n_cols() {
            self.grow(self.n_rows().max(n_rows), self.n_cols().max(n_cols))?;
        }
        Ok(())
    }

    fn grow(&mut self, n_rows: usize, n_cols: usize) -> Result<()> {
        let cells = n_rows
            .checked_mul(n_cols)
            .ok_or(MatrixError::AllocationFailed { requested: usize::MAX })?;
        let mut buffer: Vec<T> = Vec::new();
        buffer
            .try_reserve_exact(cells)
            .map_err(|_| MatrixError::AllocationFailed { requested: cells })?;
        buffer.resize(cells, T::zero());

        let mut grown = Array2::from_shape_vec((n_rows, n_cols), buffer)
            .map_err(|_| MatrixError::AllocationFailed { requested: cells })?;
        let (old_rows, old_cols) = self.data.dim();
        grown
            .slice_mut(s![..old_rows, ..old_cols])
            .assign(&self.data);
        self.data = grown;
        Ok(())
    }

    pub fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (r, row) in self.data.outer_iter().enumerate() {
            write!(out, "row {}: ", r)?;
            for (c, value) in row.iter().enumerate() {
                if !value.is_zero() {
                    write!(out, "({}, {}) ", c, value)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<T: Scalar> Default for DenseMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Matrix<T> for DenseMatrix<T> {
    fn format_name(&self) -> &'static str {
        "Dense"
    }

    fn rows(&self) -> usize {
        self.n_rows()
    }

    fn cols(&self) -> usize {
        self.n_cols()
    }

    fn nnz(&self) -> usize {
        self.nnz
    }

    fn get(&self, row: usize, col: usize) -> T {
        DenseMatrix::get(self, row, col)
    }

    fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        DenseMatrix::put(self, row, col, value)
    }

    fn declare_shape(&mut self, rows: usize, cols: usize) -> Result<()> {
        DenseMatrix::declare_shape(self, rows, cols)
    }

    fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        DenseMatrix::write_rows(self, out)
    }

    fn size_bytes(&self) -> usize {
        std::mem::size_of::<T>() * self.data.len()
    }

    fn clone_empty(&self) -> Box<dyn Matrix<T>> {
        Box::new(DenseMatrix::<T>::new())
    }
}
