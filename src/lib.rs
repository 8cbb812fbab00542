//! # sparsestore: in-memory sparse matrix storage
//!
//! sparsestore keeps mostly-zero matrices in compact formats and gives every
//! format the same interface, so matrices can be filled one entry at a time,
//! converted between formats and loaded from Matrix Market files.
//!
//! ## Overview
//!
//! - [`CsrMatrix`]: Compressed Sparse Row storage that accepts `put` in any
//!   order, shifting later rows to keep each row's entries contiguous
//! - [`CscMatrix`]: the column-major counterpart, stored as CSR of the transpose
//! - [`DenseMatrix`]: every cell stored, backed by `ndarray`
//!
//! All of them implement [`Matrix`]. The conversion drivers
//! [`convert_sparse`] and [`convert_dense`] move entries between any two
//! formats through that trait, and [`MatrixMarketIO`] reads and writes
//! `.mtx` files.
//!
//! ## Usage
//!
//! ```
//! use sparsestore::{CsrMatrix, CscMatrix, convert_sparse};
//!
//! let mut a = CsrMatrix::new();
//! a.put(0, 2, 5.0).unwrap();
//! a.put(0, 0, 1.0).unwrap();
//! a.put(2, 1, 3.0).unwrap();
//!
//! assert_eq!(a.row_start(), &[0, 2, 2, 3]);
//! assert_eq!(a.get(0, 1), 0.0);
//!
//! let mut b = CscMatrix::<f64>::new();
//! convert_sparse(&a, &mut b).unwrap();
//! assert_eq!(b.get(2, 1), 3.0);
//! ```
//!
//! Storing a zero in a compressed format is an error rather than a deletion:
//!
//! ```
//! use sparsestore::{CsrMatrix, MatrixError};
//!
//! let mut a = CsrMatrix::new();
//! assert!(matches!(a.put(1, 1, 0.0), Err(MatrixError::ExplicitZero { .. })));
//! ```

pub mod error;
pub mod matrix;
pub mod matrix_market;
pub mod utils;

// Re-export primary components
pub use error::{MatrixError, Result};
pub use matrix::{convert_dense, convert_sparse, nonzeros};
pub use matrix::{CscMatrix, CsrMatrix, DenseMatrix, Format};
pub use matrix::{GrowthPolicy, StoreConfig};
pub use matrix::{Matrix, NonzeroElement, Scalar};
pub use matrix_market::{Field, Header, IngestReport, MatrixMarketIO, Symmetry};
pub use utils::{from_sprs, to_sprs_csr};

/// Version information for the sparsestore library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
