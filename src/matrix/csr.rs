//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::Range;

use crate::error::{MatrixError, Result};
use crate::matrix::config::StoreConfig;
use crate::matrix::traits::{Matrix, NonzeroElement, Scalar};

/// A sparse matrix in Compressed Sparse Row (CSR) format that accepts
/// incremental insertion in any order.
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_start: Array of size n_rows + 1 containing indices into columns and values
/// - columns: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a row, entries keep the order in which they were first inserted;
/// they are not sorted by column. A new entry for row `r` is written at the
/// tail of row `r`'s slice and every later entry moves one slot to the right.
pub struct CsrMatrix<T> {
    /// Number of rows in the matrix
    n_rows: usize,

    /// Number of columns in the matrix (largest column seen + 1, or declared)
    n_cols: usize,

    /// Row starts (size: n_rows + 1)
    /// row_start[i] is the index in columns and values where row i starts
    /// row_start[n_rows] is equal to nnz
    row_start: Vec<usize>,

    /// Column indices (size: nnz)
    columns: Vec<usize>,

    /// Non-zero values (size: nnz)
    values: Vec<T>,

    /// Reserved slots in columns/values, always >= nnz
    capacity: usize,

    config: StoreConfig,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Creates an empty matrix with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty matrix (no rows, no entries)
    pub fn with_config(config: StoreConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            n_rows: 0,
            n_cols: 0,
            row_start: vec![0],
            columns: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
            config,
        }
    }

    /// Creates an empty matrix with the given dimensions and the default
    /// configuration
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::zeros_with_config(n_rows, n_cols, StoreConfig::default())
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros_with_config(n_rows: usize, n_cols: usize, config: StoreConfig) -> Self {
        let mut matrix = Self::with_config(config);
        matrix.row_start = vec![0; n_rows + 1];
        matrix.n_rows = n_rows;
        matrix.n_cols = n_cols;
        matrix
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_start: (0..=n).collect(),
            columns: (0..n).collect(),
            values: vec![T::one(); n],
            capacity: n,
            config: StoreConfig::default(),
        }
    }

    /// Builds a matrix from raw CSR arrays after validating them
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidLayout`] if:
    /// - row_start.len() is not n_rows + 1, does not start at 0 or decreases
    /// - columns.len() differs from values.len() or from row_start[n_rows]
    /// - a column index is >= n_cols or repeats within a row
    /// - a value is zero
    pub fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        row_start: Vec<usize>,
        columns: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let invalid = |msg: String| Err(MatrixError::InvalidLayout(msg));

        if row_start.len() != n_rows + 1 {
            return invalid(format!(
                "row_start has length {} for {} rows",
                row_start.len(),
                n_rows
            ));
        }
        if row_start[0] != 0 {
            return invalid("row_start[0] must be 0".to_string());
        }
        if let Some(i) = row_start.windows(2).position(|w| w[0] > w[1]) {
            return invalid(format!("row_start decreases at row {}", i));
        }
        if columns.len() != values.len() {
            return invalid(format!(
                "{} column indices but {} values",
                columns.len(),
                values.len()
            ));
        }
        if row_start[n_rows] != columns.len() {
            return invalid(format!(
                "row_start[n_rows] is {} but there are {} entries",
                row_start[n_rows],
                columns.len()
            ));
        }
        if values.iter().any(|v| v.is_zero()) {
            return invalid("explicit zero value".to_string());
        }

        // seen[col] == row + 1 once col has been met in row
        let mut seen = vec![0usize; n_cols];
        for row in 0..n_rows {
            for &col in &columns[row_start[row]..row_start[row + 1]] {
                if col >= n_cols {
                    return invalid(format!(
                        "column index {} out of bounds (n_cols = {})",
                        col, n_cols
                    ));
                }
                if seen[col] == row + 1 {
                    return invalid(format!("column {} repeated in row {}", col, row));
                }
                seen[col] = row + 1;
            }
        }

        Ok(Self::from_parts_unchecked(n_rows, n_cols, row_start, columns, values))
    }

    /// Assembles a matrix from arrays already known to satisfy the layout
    pub(crate) fn from_parts_unchecked(
        n_rows: usize,
        n_cols: usize,
        row_start: Vec<usize>,
        columns: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        let capacity = values.len();
        Self {
            n_rows,
            n_cols,
            row_start,
            columns,
            values,
            capacity,
            config: StoreConfig::default(),
        }
    }

    /// Number of rows in the matrix
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns in the matrix
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Reserved value slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The row start table (length n_rows + 1)
    pub fn row_start(&self) -> &[usize] {
        &self.row_start
    }

    /// Column indices of all entries, row by row
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Values of all entries, parallel to [`CsrMatrix::columns`]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn row_range(&self, row: usize) -> Option<Range<usize>> {
        if row >= self.n_rows {
            return None;
        }
        Some(self.row_start[row]..self.row_start[row + 1])
    }

    /// Index into columns/values of the entry at (row, col), if stored
    fn position(&self, row: usize, col: usize) -> Option<usize> {
        let range = self.row_range(row)?;
        self.columns[range.clone()]
            .iter()
            .position(|&c| c == col)
            .map(|offset| range.start + offset)
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) in insertion order. Rows past
    /// the end of the matrix are empty.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        let range = self.row_range(i).unwrap_or(0..0);

        self.columns[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, val)| (col, val))
    }

    /// Iterates over every stored entry in row-major order
    pub fn iter(&self) -> impl Iterator<Item = NonzeroElement<T>> + '_ {
        (0..self.n_rows).flat_map(move |row| {
            self.row_iter(row)
                .map(move |(col, &value)| NonzeroElement::new(row, col, value))
        })
    }

    /// Value at (row, col); zero when nothing is stored there
    pub fn get(&self, row: usize, col: usize) -> T {
        self.position(row, col)
            .map(|i| self.values[i])
            .unwrap_or_else(T::zero)
    }

    /// Inserts or overwrites the value at (row, col)
    ///
    /// Rows beyond the current range are created empty on demand. A new entry
    /// is appended to the tail of its row and every later entry is shifted
    /// one slot to the right.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::ExplicitZero`] if `value` is zero; the format has no
    ///   representation for removing an entry.
    /// - [`MatrixError::AllocationFailed`] if the arrays cannot grow.
    ///
    /// The matrix is unchanged when an error is returned.
    pub fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if value.is_zero() {
            return Err(MatrixError::ExplicitZero { row, col });
        }
        let rows_needed = extent(row)?;
        let cols_needed = extent(col)?;

        if let Some(i) = self.position(row, col) {
            self.values[i] = value;
            self.sync_sentinel();
            return Ok(());
        }

        // Reserve everything before touching the layout
        if row >= self.n_rows {
            self.reserve_rows(rows_needed)?;
        }
        self.reserve_slot()?;

        if row >= self.n_rows {
            self.grow_rows(rows_needed);
        }

        let end = self.row_start[row + 1];
        self.columns.insert(end, col);
        self.values.insert(end, value);

        for start in &mut self.row_start[row + 1..self.n_rows] {
            *start += 1;
        }
        self.sync_sentinel();
        self.n_cols = self.n_cols.max(cols_needed);

        Ok(())
    }

    /// Grows the logical shape to at least n_rows × n_cols
    pub fn declare_shape(&mut self, n_rows: usize, n_cols: usize) -> Result<()> {
        if n_rows > self.n_rows {
            self.reserve_rows(n_rows)?;
            self.grow_rows(n_rows);
        }
        self.n_cols = self.n_cols.max(n_cols);
        Ok(())
    }

    /// The `pos`-th entry in row-major order, or `None` if `pos >= nnz`
    pub fn nonzero_at(&self, pos: usize) -> Option<NonzeroElement<T>> {
        if pos >= self.nnz() {
            return None;
        }
        // Last row whose start is <= pos; row_start[0] == 0 so this is >= 1
        let row = self.row_start.partition_point(|&start| start <= pos) - 1;
        Some(NonzeroElement::new(row, self.columns[pos], self.values[pos]))
    }

    /// Storage footprint: row table, column indices and values
    pub fn size_bytes(&self) -> usize {
        let index = std::mem::size_of::<usize>();
        index * (self.n_rows + 1) + index * self.nnz() + std::mem::size_of::<T>() * self.nnz()
    }

    fn reserve_rows(&mut self, n_rows: usize) -> Result<()> {
        let len = extent(n_rows)?;
        let additional = len.saturating_sub(self.row_start.len());
        self.row_start
            .try_reserve_exact(additional)
            .map_err(|_| MatrixError::AllocationFailed { requested: len })
    }

    /// Makes sure one more entry fits, growing by the configured policy
    fn reserve_slot(&mut self) -> Result<()> {
        let nnz = self.nnz();
        if nnz < self.capacity {
            return Ok(());
        }

        let target = self.config.growth.next_capacity(self.capacity);
        if target <= nnz {
            return Err(MatrixError::AllocationFailed { requested: usize::MAX });
        }
        let additional = target - nnz;
        let failed = |_| MatrixError::AllocationFailed { requested: target };
        self.columns.try_reserve_exact(additional).map_err(failed)?;
        self.values.try_reserve_exact(additional).map_err(failed)?;
        self.capacity = target;
        Ok(())
    }

    /// New rows start empty at the current nnz
    fn grow_rows(&mut self, n_rows: usize) {
        let nnz = self.nnz();
        self.row_start.resize(n_rows + 1, nnz);
        self.n_rows = n_rows;
    }

    fn sync_sentinel(&mut self) {
        self.row_start[self.n_rows] = self.values.len();
    }

    /// Writes "row R: (col, value) ..." for every row
    pub fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for row in 0..self.n_rows {
            write!(out, "row {}: ", row)?;
            for (col, value) in self.row_iter(row) {
                write!(out, "({}, {}) ", col, value)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Length needed to hold `index`; fails when it is not representable
pub(crate) fn extent(index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .ok_or(MatrixError::AllocationFailed { requested: usize::MAX })
}

impl<T: Scalar> Default for CsrMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CsrMatrix<T> {
    fn clone(&self) -> Self {
        let mut columns = Vec::with_capacity(self.capacity);
        columns.extend_from_slice(&self.columns);
        let mut values = Vec::with_capacity(self.capacity);
        values.extend_from_slice(&self.values);

        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_start: self.row_start.clone(),
            columns,
            values,
            capacity: self.capacity,
            config: self.config.clone(),
        }
    }
}

impl<T: Scalar> Matrix<T> for CsrMatrix<T> {
    fn format_name(&self) -> &'static str {
        "CSR"
    }

    fn rows(&self) -> usize {
        self.n_rows
    }

    fn cols(&self) -> usize {
        self.n_cols
    }

    fn nnz(&self) -> usize {
        CsrMatrix::nnz(self)
    }

    fn get(&self, row: usize, col: usize) -> T {
        CsrMatrix::get(self, row, col)
    }

    fn put(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        CsrMatrix::put(self, row, col, value)
    }

    fn supports_nonzero_enumeration(&self) -> bool {
        true
    }

    fn nonzero_at(&self, pos: usize) -> Option<NonzeroElement<T>> {
        CsrMatrix::nonzero_at(self, pos)
    }

    fn declare_shape(&mut self, rows: usize, cols: usize) -> Result<()> {
        CsrMatrix::declare_shape(self, rows, cols)
    }

    fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        CsrMatrix::write_rows(self, out)
    }

    fn size_bytes(&self) -> usize {
        CsrMatrix::size_bytes(self)
    }

    fn clone_empty(&self) -> Box<dyn Matrix<T>> {
        Box::new(CsrMatrix::<T>::with_config(self.config.clone()))
    }
}

impl<T: Scalar> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {} (capacity {})", self.nnz(), self.capacity)?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_start[i];
                let end = self.row_start[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.columns[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
