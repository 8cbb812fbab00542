//! Integration tests for conversions between formats and with sprs

use sparsestore::{
    convert_dense, convert_sparse, from_sprs, to_sprs_csr, CscMatrix, CsrMatrix, DenseMatrix, Format,
    Matrix, StoreConfig,
};

/// Creates a test matrix with a specific pattern, inserted out of order:
// [ 1.0  0.0  2.0  0.0  0.0 ]
// [ 0.0  3.0  0.0  0.0  4.0 ]
// [ 0.0  0.0  5.0  0.0  0.0 ]
// [ 6.0  0.0  0.0  7.0  0.0 ]
// [ 0.0  0.0  8.0  0.0  9.0 ]
fn create_test_matrix_csr() -> CsrMatrix<f64> {
    let mut m = CsrMatrix::<f64>::new();
    for &(r, c, v) in &[
        (4, 4, 9.0),
        (0, 2, 2.0),
        (3, 3, 7.0),
        (1, 1, 3.0),
        (0, 0, 1.0),
        (2, 2, 5.0),
        (4, 2, 8.0),
        (1, 4, 4.0),
        (3, 0, 6.0),
    ] {
        m.put(r, c, v).unwrap();
    }
    m
}

/// Creates a tridiagonal matrix in CSR format
fn create_tridiagonal_csr(n: usize) -> CsrMatrix<f64> {
    let mut m = CsrMatrix::<f64>::new();

    for i in 0..n {
        // Diagonal
        m.put(i, i, 2.0).unwrap();

        // Lower diagonal
        if i > 0 {
            m.put(i, i - 1, 1.0).unwrap();
        }

        // Upper diagonal
        if i < n - 1 {
            m.put(i, i + 1, 1.0).unwrap();
        }
    }

    m
}

fn assert_same_values(a: &dyn Matrix<f64>, b: &dyn Matrix<f64>) {
    assert_eq!(a.rows(), b.rows());
    assert_eq!(a.cols(), b.cols());
    for r in 0..a.rows() {
        for c in 0..a.cols() {
            assert_eq!(a.get(r, c), b.get(r, c), "mismatch at ({}, {})", r, c);
        }
    }
}

#[test]
fn test_layout_after_out_of_order_inserts() {
    let m = create_test_matrix_csr();

    assert_eq!(m.row_start(), &[0, 2, 4, 5, 7, 9]);
    assert_eq!(m.nnz(), 9);
    assert_eq!(m.get(3, 0), 6.0);
    assert_eq!(m.get(4, 2), 8.0);
}

#[test]
fn test_convert_sparse_into_every_format() {
    let source = create_test_matrix_csr();
    let config = StoreConfig::default();

    for format in Format::ALL {
        let mut dest = format.empty::<f64>(&config);
        let moved = convert_sparse(&source, dest.as_mut()).unwrap();

        assert_eq!(moved, source.nnz());
        assert_eq!(dest.nnz(), source.nnz());
        assert_same_values(&source, dest.as_ref());
    }
}

#[test]
fn test_csc_to_csr_via_driver_keeps_column_major_order() {
    let source = create_test_matrix_csr().to_csc();
    let mut dest = CsrMatrix::<f64>::new();

    convert_sparse(&source, &mut dest).unwrap();

    // Column-major enumeration lands in each row in ascending column order
    let row3: Vec<_> = dest.row_iter(3).collect();
    assert_eq!(row3, vec![(0, &6.0), (3, &7.0)]);
    assert_same_values(&source, &dest);
}

#[test]
fn test_dense_source_goes_through_convert_dense() {
    let dense = DenseMatrix::from_rows(&[
        vec![1.0, 0.0, 2.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 3.0, 0.0],
    ]);
    let mut csr = CsrMatrix::<f64>::new();

    // No positional enumeration on dense, so the sparse driver does nothing
    assert_eq!(convert_sparse(&dense, &mut csr).unwrap(), 0);

    let accepted = convert_dense(&dense, &mut csr, &StoreConfig::default()).unwrap();

    assert_eq!(accepted, 3);
    assert_eq!(csr.row_start(), &[0, 2, 2, 3]);
    assert_same_values(&dense, &csr);
}

#[test]
fn test_convert_dense_large_source_with_short_interval() {
    let n = 150;
    let mut dense = DenseMatrix::zeros(n, n);
    for i in 0..n {
        dense.put(i, (i * 7) % n, (i + 1) as f64).unwrap();
    }
    let mut csc = CscMatrix::<f64>::new();
    let config = StoreConfig::new().with_progress_interval(1000);

    let accepted = convert_dense(&dense, &mut csc, &config).unwrap();

    assert_eq!(accepted, n);
    assert_same_values(&dense, &csc);
}

#[test]
fn test_csr_to_sprs_conversion() {
    let csr = create_test_matrix_csr();

    let sprs_mat = to_sprs_csr(&csr);

    assert_eq!(sprs_mat.rows(), csr.n_rows());
    assert_eq!(sprs_mat.cols(), csr.n_cols());
    assert_eq!(sprs_mat.nnz(), csr.nnz());
    assert!(sprs_mat.is_csr());

    assert_eq!(sprs_mat.get(0, 0), Some(&1.0));
    assert_eq!(sprs_mat.get(0, 2), Some(&2.0));
    assert_eq!(sprs_mat.get(1, 1), Some(&3.0));
    assert_eq!(sprs_mat.get(2, 2), Some(&5.0));
    assert_eq!(sprs_mat.get(3, 3), Some(&7.0));
    assert_eq!(sprs_mat.get(4, 4), Some(&9.0));

    // Check that zeros are really zeros
    assert_eq!(sprs_mat.get(0, 1), None);
    assert_eq!(sprs_mat.get(1, 0), None);
    assert_eq!(sprs_mat.get(2, 3), None);
}

#[test]
fn test_sprs_multiply_via_conversion() {
    // A = tridiag(1, 2, 1), A*A computed by sprs and brought back
    let a = create_tridiagonal_csr(4);
    let sprs_a = to_sprs_csr(&a);

    let product = &sprs_a * &sprs_a;
    let result = from_sprs(&product).unwrap();

    assert_eq!(result.n_rows(), 4);
    assert_eq!(result.get(0, 0), 5.0);
    assert_eq!(result.get(1, 1), 6.0);
    assert_eq!(result.get(0, 1), 4.0);
    assert_eq!(result.get(0, 2), 1.0);
    assert_eq!(result.get(0, 3), 0.0);
}
