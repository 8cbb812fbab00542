//! Conversion between matrix formats
//!
//! Two kinds of conversion live here. The generic drivers work through the
//! [`Matrix`] trait and push every entry of the source through the
//! destination's `put`, so they work for any pair of formats. The bulk
//! CSR/CSC conversions rebuild the arrays directly with a counting sort.

use crate::error::Result;
use crate::matrix::config::StoreConfig;
use crate::matrix::traits::{nonzeros, Matrix, Scalar};
use crate::matrix::{CscMatrix, CsrMatrix};

/// Copies every stored entry of `from` into `to`, in `from`'s enumeration order
///
/// Does nothing when `from` cannot enumerate its nonzeros. Otherwise `to` is
/// first grown to `from`'s shape. Returns the number of entries transferred.
///
/// # Errors
///
/// The first error returned by `to.put` is propagated; entries transferred
/// before it remain in `to`.
pub fn convert_sparse<T: Scalar>(from: &dyn Matrix<T>, to: &mut dyn Matrix<T>) -> Result<usize> {
    if !from.supports_nonzero_enumeration() {
        log::debug!(
            "{} source has no nonzero enumeration, nothing to convert",
            from.format_name()
        );
        return Ok(0);
    }

    to.declare_shape(from.rows(), from.cols())?;
    let mut transferred = 0;
    for element in nonzeros(from) {
        to.put(element.row, element.col, element.value)?;
        transferred += 1;
    }
    Ok(transferred)
}

/// Copies every cell of `from`, zeros included, into `to` in row-major order
///
/// `to` is first grown to `from`'s shape. Destinations that reject explicit
/// zeros leave those cells implicitly zero. Progress is logged every
/// `config.progress_interval` cells and on the last one. Returns the number
/// of cells `to` accepted.
pub fn convert_dense<T: Scalar>(
    from: &dyn Matrix<T>,
    to: &mut dyn Matrix<T>,
    config: &StoreConfig,
) -> Result<usize> {
    let (rows, cols) = (from.rows(), from.cols());
    let total = rows * cols;
    let interval = config.progress_interval.max(1);
    let mut accepted = 0;

    to.declare_shape(rows, cols)?;

    for r in 0..rows {
        for c in 0..cols {
            let current = r * cols + c + 1;

            match to.put(r, c, from.get(r, c)) {
                Ok(()) => accepted += 1,
                Err(err) if err.is_explicit_zero() => {
                    log::trace!("Skipping zero at ({}, {})", r, c);
                }
                Err(err) => return Err(err),
            }

            if reports_progress(current, total, interval) {
                log::debug!("Converting {}/{}", current, total);
            }
        }
    }

    Ok(accepted)
}

/// Whether the `current`-th of `total` cells (1-based) gets a progress line
fn reports_progress(current: usize, total: usize, interval: usize) -> bool {
    current % interval == 0 || current == total
}

impl<T: Scalar> CsrMatrix<T> {
    /// Builds the transpose, with each output row sorted by column
    pub fn transpose(&self) -> CsrMatrix<T> {
        // Count non-zeros per column
        let mut col_counts = vec![0; self.n_cols()];

        for &col in self.columns() {
            col_counts[col] += 1;
        }

        // Compute column pointers via prefix sum
        let mut col_ptr = vec![0; self.n_cols() + 1];
        let mut sum = 0;

        for (i, &count) in col_counts.iter().enumerate() {
            col_ptr[i] = sum;
            sum += count;
        }
        col_ptr[self.n_cols()] = sum;

        let nnz = self.nnz();
        let mut row_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        let mut next = col_ptr.clone();

        for i in 0..self.n_rows() {
            for (col, &value) in self.row_iter(i) {
                let pos = next[col];

                row_idx[pos] = i;
                values[pos] = value;

                next[col] += 1;
            }
        }

        CsrMatrix::from_parts_unchecked(self.n_cols(), self.n_rows(), col_ptr, row_idx, values)
    }

    /// Converts this CSR matrix to CSC format
    pub fn to_csc(&self) -> CscMatrix<T> {
        CscMatrix::from_transposed(self.transpose())
    }
}

impl<T: Scalar> CscMatrix<T> {
    /// Converts this CSC matrix to CSR format
    pub fn to_csr(&self) -> CsrMatrix<T> {
        // The transposed store's n_cols tracks our n_rows, so trailing empty
        // rows survive the transpose
        self.transposed().transpose()
    }
}
