//! Runtime selection of a storage format

use std::fmt;
use std::str::FromStr;

use crate::error::MatrixError;
use crate::matrix::config::StoreConfig;
use crate::matrix::traits::{Matrix, Scalar};
use crate::matrix::{CscMatrix, CsrMatrix, DenseMatrix};

/// The storage formats this crate provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csr,
    Csc,
    Dense,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Csr, Format::Csc, Format::Dense];

    /// A new, empty matrix in this format
    pub fn empty<T: Scalar>(&self, config: &StoreConfig) -> Box<dyn Matrix<T>> {
        match self {
            Format::Csr => Box::new(CsrMatrix::<T>::with_config(config.clone())),
            Format::Csc => Box::new(CscMatrix::<T>::with_config(config.clone())),
            Format::Dense => Box::new(DenseMatrix::<T>::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Csr => "CSR",
            Format::Csc => "CSC",
            Format::Dense => "Dense",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csr" => Ok(Format::Csr),
            "csc" => Ok(Format::Csc),
            "dense" => Ok(Format::Dense),
            _ => Err(MatrixError::Unsupported("unknown format (expected csr, csc or dense)")),
        }
    }
}
