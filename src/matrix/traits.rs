//! The format-independent matrix interface

use crate::error::Result;
use num_traits::Num;
use std::fmt;

/// Element types storable in any format
pub trait Scalar: Copy + Num + fmt::Display + fmt::Debug + 'static {}

impl<T> Scalar for T where T: Copy + Num + fmt::Display + fmt::Debug + 'static {}

/// A single stored entry, detached from the matrix it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonzeroElement<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> NonzeroElement<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }
}

/// Operations every storage format provides.
///
/// The format is chosen when the matrix is constructed; conversion between
/// formats goes through [`Matrix::nonzero_at`] on the source and
/// [`Matrix::put`] on the destination.
pub trait Matrix<T: Scalar> {
    /// Short name of the storage format ("CSR", "CSC", "Dense")
    fn format_name(&self) -> &'static str;

    /// Logical number of rows
    fn rows(&self) -> usize;

    /// Logical number of columns
    fn cols(&self) -> usize;

    /// Number of stored nonzero entries
    fn nnz(&self) -> usize;

    /// Value at `(row, col)`, or zero when nothing is stored there
    fn get(&self, row: usize, col: usize) -> T;

    /// Insert or overwrite the value at `(row, col)`
    fn put(&mut self, row: usize, col: usize, value: T) -> Result<()>;

    /// Whether [`Matrix::nonzero_at`] is implemented by this format
    fn supports_nonzero_enumeration(&self) -> bool {
        false
    }

    /// The `pos`-th stored entry in the format's enumeration order
    ///
    /// Returns `None` when `pos >= nnz()` or the format cannot enumerate.
    fn nonzero_at(&self, _pos: usize) -> Option<NonzeroElement<T>> {
        None
    }

    /// Grow the logical dimensions to at least `rows × cols`; never shrinks
    fn declare_shape(&mut self, rows: usize, cols: usize) -> Result<()>;

    /// Human readable dump, one line per row (or column for CSC)
    fn write_rows(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Write [`Matrix::write_rows`] to stdout
    fn print(&self) {
        let mut buf = String::new();
        if self.write_rows(&mut buf).is_ok() {
            print!("{}", buf);
        }
    }

    /// Estimated storage footprint in bytes
    fn size_bytes(&self) -> usize;

    /// A new, empty matrix of the same format and configuration
    fn clone_empty(&self) -> Box<dyn Matrix<T>>;
}

/// Iterator over a matrix's stored entries via positional lookup
pub struct Nonzeros<'a, T: Scalar> {
    matrix: &'a dyn Matrix<T>,
    pos: usize,
    end: usize,
}

impl<'a, T: Scalar> Iterator for Nonzeros<'a, T> {
    type Item = NonzeroElement<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let element = self.matrix.nonzero_at(self.pos);
        self.pos += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (0, Some(remaining))
    }
}

/// Enumerate every stored entry of `matrix` in its enumeration order
///
/// Yields nothing for formats without nonzero enumeration.
pub fn nonzeros<T: Scalar>(matrix: &dyn Matrix<T>) -> Nonzeros<'_, T> {
    let end = if matrix.supports_nonzero_enumeration() {
        matrix.nnz()
    } else {
        0
    };
    Nonzeros { matrix, pos: 0, end }
}
