//! Utilities for converting between our matrix formats and sprs

use crate::error::{MatrixError, Result};
use crate::matrix::{CsrMatrix, Scalar};
use sprs::CsMat;

/// Converts our CSR matrix to a sprs CsMat in CSR storage
///
/// sprs requires sorted column indices, so each row is sorted on the way out;
/// insertion order is not preserved.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> CsMat<T>
where
    T: Scalar + Default,
{
    let indptr = matrix.row_start().to_vec();

    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());
    let mut row: Vec<(usize, T)> = Vec::new();

    for i in 0..matrix.n_rows() {
        row.clear();
        row.extend(matrix.row_iter(i).map(|(col, &val)| (col, val)));
        row.sort_unstable_by_key(|&(col, _)| col);

        for &(col, val) in &row {
            indices.push(col);
            data.push(val);
        }
    }

    CsMat::new((matrix.n_rows(), matrix.n_cols()), indptr, indices, data)
}

/// Builds our CSR matrix from any sprs CsMat
///
/// Entries are inserted row by row in sprs order. Explicitly stored zeros
/// are dropped since our CSR cannot hold them.
pub fn from_sprs<T>(matrix: &CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Scalar + Default,
{
    // Ensure matrix is in CSR storage
    let owned;
    let csr = if matrix.is_csr() {
        matrix
    } else {
        owned = matrix.to_csr();
        &owned
    };

    let mut out = CsrMatrix::new();
    out.declare_shape(csr.rows(), csr.cols())?;

    for (row, vec) in csr.outer_iterator().enumerate() {
        for (col, &val) in vec.iter() {
            match out.put(row, col, val) {
                Ok(()) => {}
                Err(MatrixError::ExplicitZero { .. }) => {}
                Err(err) => return Err(err),
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_roundtrip() {
        let original = CsrMatrix::from_raw_parts(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0f64, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();

        // Convert to sprs and back
        let sprs_mat = to_sprs_csr(&original);
        let roundtrip = from_sprs(&sprs_mat).unwrap();

        assert_eq!(roundtrip.n_rows(), original.n_rows());
        assert_eq!(roundtrip.n_cols(), original.n_cols());
        assert_eq!(roundtrip.nnz(), original.nnz());
        assert_eq!(roundtrip.row_start(), original.row_start());
        assert_eq!(roundtrip.columns(), original.columns());
    }

    #[test]
    fn test_unsorted_rows_are_sorted_for_sprs() {
        let mut m = CsrMatrix::new();
        m.put(0, 2, 5.0f64).unwrap();
        m.put(0, 0, 1.0).unwrap();
        m.put(2, 1, 3.0).unwrap();

        let sprs_mat = to_sprs_csr(&m);

        assert!(sprs_mat.is_csr());
        assert_eq!(sprs_mat.indptr().raw_storage(), &[0, 2, 2, 3]);
        assert_eq!(sprs_mat.indices(), &[0, 2, 1]);
        assert_eq!(sprs_mat.get(0, 2), Some(&5.0));
        assert_eq!(sprs_mat.get(0, 1), None);
    }

    #[test]
    fn test_from_sprs_csc_storage() {
        let csc = CsMat::new_csc((2, 2), vec![0, 1, 2], vec![1, 0], vec![4.0f64, 6.0]);
        let m = from_sprs(&csc).unwrap();

        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.get(0, 1), 6.0);
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn test_from_sprs_drops_stored_zeros() {
        let mat = CsMat::new((1, 2), vec![0, 2], vec![0, 1], vec![0.0f64, 2.0]);
        let m = from_sprs(&mat).unwrap();

        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 1), 2.0);
    }
}
