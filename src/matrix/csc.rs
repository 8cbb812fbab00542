//! Compressed Sparse Column (CSC) matrix format implementation

use std::fmt;

use crate::error::{MatrixError, Result};
use crate::matrix::config::StoreConfig;
use crate::matrix::csr::{extent, CsrMatrix};
use crate::matrix::traits::{Matrix, NonzeroElement, Scalar};

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// Stored as the CSR layout of the transpose: the inner store's rows are
/// this matrix's columns. Every CSR guarantee (insertion order within a
/// column, zero rejection, automatic growth) carries over with rows and
/// columns swapped, and enumeration is column-major.
#[derive(Clone)]
pub struct CscMatrix<T> {
    /// Number of rows in the matrix
    n_rows: usize,

    /// Transposed storage; its row count is our column count
    inner: CsrMatrix<T>,
}

impl<T: Scalar> CscMatrix<T> {
    /// Creates an empty matrix with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            n_rows: 0,
            inner: CsrMatrix::with_config(config),
        }
    }

    /// Creates an empty matrix with the given dimensions and the default
    /// configuration
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::zeros_with_config(n_rows, n_cols, StoreConfig::default())
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros_with_config(n_rows: usize, n_cols: usize, config: StoreConfig) -> Self {
        Self {
            n_rows,
            inner: CsrMatrix::zeros_with_config(n_cols, n_rows, config),
        }
    }

    /// Builds a matrix from raw CSC arrays after validating them
    ///
    /// The column pointers, row indices and values follow the same rules as
    /// [`CsrMatrix::from_raw_parts`] with rows and columns swapped.
    pub fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let inner = CsrMatrix::from_raw_parts(n_cols, n_rows, col_ptr, row_idx, values)?;
        Ok(Self { n_rows, inner })
    }

    /// Wraps a CSR store that already holds the transpose of this matrix
    pub(crate) fn from_transposed(inner: CsrMatrix<T>) -> Self {
        Self {
            n_rows: inner.n_cols(),
            inner,
        }
    }

    /// The transposed CSR storage
    pub(crate) fn transposed(&self) -> &CsrMatrix<T> {
        &self.inner
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.inner.n_rows()
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Column pointers (size: n_cols + 1)
    pub fn col_ptr(&self) -> &[usize] {
        self.inner.row_start()
    }

    /// Row indices of all entries, column by column
    pub fn row_idx(&self) -> &[usize] {
        self.inner.columns()
    }

    pub fn values(&self) -> &[T] {
        self.inner.values()
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        self.inner.row_iter(j)
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.inner.get(col, row)
    }

    /// Inserts or overwrites the value at (row, col)
    ///
    /// # Errors
    ///
    /// [`MatrixError::ExplicitZero`] for a zero value, reported with the
    /// caller's coordinates, and [`MatrixError::AllocationFailed`] when the
    /// storage cannot grow.
    pub fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if value.is_zero() {
            return Err(MatrixError::ExplicitZero { row, col });
        }
        let rows_needed = extent(row)?;

        self.inner.put(col, row, value)?;
        self.n_rows = self.n_rows.max(rows_needed);
        Ok(())
    }

    /// The `pos`-th entry in column-major order
    pub fn nonzero_at(&self, pos: usize) -> Option<NonzeroElement<T>> {
        self.inner
            .nonzero_at(pos)
            .map(|e| NonzeroElement::new(e.col, e.row, e.value))
    }

    pub fn declare_shape(&mut self, n_rows: usize, n_cols: usize) -> Result<()> {
        self.inner.declare_shape(n_cols, n_rows)?;
        self.n_rows = self.n_rows.max(n_rows);
        Ok(())
    }

    /// Writes "col C: (row, value) ..." for every column
    pub fn write_cols(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for col in 0..self.n_cols() {
            write!(out, "col {}: ", col)?;
            for (row, value) in self.col_iter(col) {
                write!(out, "({}, {}) ", row, value)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<T: Scalar> Default for CscMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Matrix<T> for CscMatrix<T> {
    fn format_name(&self) -> &'static str {
        "CSC"
    }

    fn rows(&self) -> usize {
        self.n_rows
    }

    fn cols(&self) -> usize {
        self.n_cols()
    }

    fn nnz(&self) -> usize {
        CscMatrix::nnz(self)
    }

    fn get(&self, row: usize, col: usize) -> T {
        CscMatrix::get(self, row, col)
    }

    fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        CscMatrix::put(self, row, col, value)
    }

    fn supports_nonzero_enumeration(&self) -> bool {
        true
    }

    fn nonzero_at(&self, pos: usize) -> Option<NonzeroElement<T>> {
        CscMatrix::nonzero_at(self, pos)
    }

    fn declare_shape(&mut self, rows: usize, cols: usize) -> Result<()> {
        CscMatrix::declare_shape(self, rows, cols)
    }

    fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.write_cols(out)
    }

    fn size_bytes(&self) -> usize {
        self.inner.size_bytes()
    }

    fn clone_empty(&self) -> Box<dyn Matrix<T>> {
        Box::new(CscMatrix::<T>::with_config(self.inner.config().clone()))
    }
}

impl<T: Scalar> fmt::Debug for CscMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CscMatrix")
            .field("n_rows", &self.n_rows)
            .field("n_cols", &self.n_cols())
            .field("nnz", &self.nnz())
            .field("col_ptr", &self.col_ptr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        let matrix = CscMatrix::from_raw_parts(
            3, 3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        )
        .unwrap();

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.nnz(), 5);
        assert_eq!(matrix.get(2, 0), 4);
        assert_eq!(matrix.get(1, 2), 0);
    }

    #[test]
    fn test_col_iter() {
        let matrix = CscMatrix::from_raw_parts(
            3, 3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        )
        .unwrap();

        let col0: Vec<_> = matrix.col_iter(0).collect();
        assert_eq!(col0, vec![(0, &1), (2, &4)]);

        let col1: Vec<_> = matrix.col_iter(1).collect();
        assert_eq!(col1, vec![(0, &2), (1, &3)]);

        let col2: Vec<_> = matrix.col_iter(2).collect();
        assert_eq!(col2, vec![(2, &5)]);
    }

    #[test]
    fn test_incremental_put() {
        let mut m = CscMatrix::new();
        m.put(0, 2, 5.0).unwrap();
        m.put(0, 0, 1.0).unwrap();
        m.put(2, 1, 3.0).unwrap();

        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.n_cols(), 3);
        assert_eq!(m.col_ptr(), &[0, 1, 2, 3]);
        assert_eq!(m.get(0, 2), 5.0);
        assert_eq!(m.get(2, 1), 3.0);

        // Column-major enumeration
        let order: Vec<_> = (0..m.nnz()).filter_map(|p| m.nonzero_at(p)).collect();
        assert_eq!(
            order,
            vec![
                NonzeroElement::new(0, 0, 1.0),
                NonzeroElement::new(2, 1, 3.0),
                NonzeroElement::new(0, 2, 5.0),
            ]
        );
    }

    #[test]
    fn test_zero_reports_caller_coordinates() {
        let mut m = CscMatrix::<f64>::new();
        let err = m.put(4, 1, 0.0).unwrap_err();
        assert!(matches!(err, MatrixError::ExplicitZero { row: 4, col: 1 }));
        assert_eq!(m.n_rows(), 0);
    }

    #[test]
    fn test_index_overflow_leaves_matrix_unchanged() {
        let mut m = CscMatrix::new();
        m.put(1, 0, 2.0).unwrap();

        for (row, col) in [(usize::MAX, 0), (0, usize::MAX), (usize::MAX, usize::MAX)] {
            let err = m.put(row, col, 1.0).unwrap_err();
            assert!(matches!(err, MatrixError::AllocationFailed { .. }));
            assert_eq!((m.n_rows(), m.n_cols()), (2, 1));
            assert_eq!(m.nnz(), 1);
            assert_eq!(m.col_ptr(), &[0, 1]);
        }
    }

    #[test]
    fn test_zeros_with_config() {
        use crate::matrix::config::GrowthPolicy;

        let config = StoreConfig::new().with_growth(GrowthPolicy::Exact);
        let mut m = CscMatrix::zeros_with_config(3, 2, config);
        assert_eq!((m.n_rows(), m.n_cols()), (3, 2));
        assert_eq!(m.col_ptr(), &[0, 0, 0]);

        m.put(2, 1, 1.0).unwrap();
        assert_eq!(m.transposed().capacity(), 1);
    }

    #[test]
    fn test_write_cols() {
        let mut m = CscMatrix::new();
        m.put(1, 0, 2).unwrap();
        m.put(0, 1, 7).unwrap();

        let mut out = String::new();
        Matrix::write_rows(&m, &mut out).unwrap();
        assert_eq!(out, "col 0: (1, 2) \ncol 1: (0, 7) \n");
    }
}
